pub mod interests;
pub mod member;
pub mod member_key;
pub mod subscriber_email;
pub mod subscriber_status;
pub mod subscription;
