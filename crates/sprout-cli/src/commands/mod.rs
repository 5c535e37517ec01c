//! Command handlers.  Each translates parsed arguments into a core call and
//! renders the outcome.

pub mod init;
