pub mod captcha;
pub mod encode;
pub mod persist;
