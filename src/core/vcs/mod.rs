pub mod oracle;

pub use oracle::CommitOracle;
