use thiserror::Error;

/// Errors raised while fetching or decoding reference catalogs.
#[derive(Debug, Error)]
pub enum DragonError {
  /// The server answered with something other than `200 OK`.
  #[error("expected `HTTP 200` from `{url}`, got `HTTP {status}`")]
  Http { url: String, status: u16 },

  /// The request never produced a response (DNS, TLS, socket...).
  #[error("request to `{url}` failed: {message}")]
  Transport { url: String, message: String },

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("could not decode `{url}`: {source}")]
  Decode {
    url:    String,
    #[source]
    source: serde_json::Error,
  },

  /// The document decoded but is not shaped like a catalog.
  #[error("unexpected catalog layout in `{url}`: {detail}")]
  Shape { url: String, detail: String },
}
