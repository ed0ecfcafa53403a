pub mod clustering;
pub mod features;
pub mod metrics;
pub mod output;
pub mod pipeline;
