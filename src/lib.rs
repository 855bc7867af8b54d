pub mod account;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod journal;
pub mod loan;
pub mod posting;
pub mod schedule;
pub mod types;

// re-export key types
pub use account::Account;
pub use config::{AccountRole, ChartOfAccounts};
pub use decimal::{Money, Rate};
pub use errors::{Result, ServicingError};
pub use events::{Event, EventStore};
pub use journal::{Journal, OperationReceipt};
pub use loan::Loan;
pub use posting::{DisbursementFees, Entry, EntryBuilder, Leg, Side};
pub use schedule::{
    analyze_loan_status, generate_schedule, AgeBucket, ArrearsSummary, Installment,
    PortfolioSummary,
};
pub use types::{
    AccountId, AccountKind, AccountStatus, EntryId, InstallmentStatus, LoanId, LoanStatus,
    OperationKind, PaymentRecord, RiskLevel,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
