pub mod cycle;
pub mod domain;
pub mod ports;
pub mod session;
pub mod symptoms;

pub use cycle::{predict_cycle, CyclePrediction, DateRange};
pub use domain::{Account, Reminder, SessionUser, SymptomRecord};
pub use ports::{AccountStore, PortError, PortResult, RecordStore, SessionStore};
pub use session::SessionState;
pub use symptoms::{analyze_symptoms, parse_symptoms, RiskLevel, SymptomAnalysis};
