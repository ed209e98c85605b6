mod request_quote;

pub use request_quote::RequestQuote;
