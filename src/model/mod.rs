pub mod attendance;
pub mod department;
pub mod role;
pub mod section;
pub mod shift;
pub mod status;
pub mod user;
pub mod worker;
