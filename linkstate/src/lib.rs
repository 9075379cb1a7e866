pub mod concepts;
pub mod feedback;
pub mod framework;
pub mod network;
pub mod router;
pub mod spf;
pub mod topology;
pub mod util;
