pub mod care_plan;
pub mod challenge;
pub mod mood;
pub mod post;
