mod home;

pub use home::{submit_scrap, HomePage, SubmitScrapFn};
