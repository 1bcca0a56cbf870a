pub mod aggregate;
pub mod schedule;

pub use aggregate::{Commerce, CommerceDto, CommerceId, GistPublication, PaymentMethod};
pub use schedule::{DaySchedule, WeekSchedule};
