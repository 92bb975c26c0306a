pub mod buildings;
pub mod courses;
pub mod docs;
pub mod schedules;
pub mod users;
