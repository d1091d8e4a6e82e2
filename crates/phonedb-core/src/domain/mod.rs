pub mod ids;
pub mod phone;

pub use ids::PhoneId;
pub use phone::{
    is_canonical, normalize_phone, validate_phone_number, PhoneRecord, MAX_PHONE_NUMBER_LEN,
};
