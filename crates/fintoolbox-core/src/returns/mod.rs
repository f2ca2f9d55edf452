pub mod cash_flow;
pub mod irr;
pub mod mirr;
pub mod npv;
pub mod periodicity;

pub use cash_flow::validate_cash_flow_schedule;
pub use irr::{analyze_irr, compute_irr, compute_irr_annualized, IrrError, IrrResult};
pub use mirr::{analyze_mirr, compute_mirr, MirrError, MirrResult};
pub use npv::{analyze_npv, compute_npv, NpvOutput};
pub use periodicity::{annualize, deannualize, Periodicity};
