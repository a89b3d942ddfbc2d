pub mod archive;
pub mod manual;
pub mod notify;
pub mod report;
pub mod run;
