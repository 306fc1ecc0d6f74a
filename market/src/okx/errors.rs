use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error {code}: {msg}")]
    Api { code: String, msg: String },

    #[error("empty response from market api")]
    EmptyResponse,

    #[error("malformed candle row: {0}")]
    MalformedCandle(String),

    #[error("integer parse error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("float parse error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}
