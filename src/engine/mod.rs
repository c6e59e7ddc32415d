pub mod assessment;
pub mod elapsed;
pub mod feedback;
pub mod scoring;
