//! Background maintenance tasks spawned at server start.

pub mod session_cleanup;
