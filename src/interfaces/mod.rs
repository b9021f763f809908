// ============================================================================
// Interfaces Module
// Pluggable output adapters: formatter and JSON codec
// ============================================================================

mod formatter;
mod json_codec;

pub use formatter::{CurrencyFormatter, CurrencyParts, FormatError, PlainFormatter};
pub use json_codec::{CodecError, JsonDecoder, JsonEncoder, PlainJsonCodec};

use std::sync::{Arc, LazyLock};

static DEFAULT_FORMATTER: LazyLock<Arc<PlainFormatter>> =
    LazyLock::new(|| Arc::new(PlainFormatter::new()));

static DEFAULT_JSON_CODEC: LazyLock<Arc<PlainJsonCodec>> =
    LazyLock::new(|| Arc::new(PlainJsonCodec));

/// Shared instance of the built-in formatter.
pub fn default_formatter() -> Arc<dyn CurrencyFormatter> {
    DEFAULT_FORMATTER.clone()
}

/// Shared instance of the built-in JSON encoder.
pub fn default_json_encoder() -> Arc<dyn JsonEncoder> {
    DEFAULT_JSON_CODEC.clone()
}

/// Shared instance of the built-in JSON decoder.
pub fn default_json_decoder() -> Arc<dyn JsonDecoder> {
    DEFAULT_JSON_CODEC.clone()
}
