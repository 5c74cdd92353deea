pub mod glb;

/// I/O and format-conversion errors for the binary asset path.
///
/// Import failures surface the parser's own message; export failures name
/// the geometry problem. The two size variants exist so an undersized
/// (truncated) or oversized buffer is rejected *before* any upload is
/// attempted.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("could not encode glTF document: {0}")]
    JsonEncode(#[from] serde_json::Error),

    #[error("scene contains no triangle geometry")]
    EmptyScene,

    #[error("geometry is malformed: {0}")]
    MalformedGeometry(String),

    #[error("exported buffer is {len} bytes, below the {floor}-byte floor")]
    UndersizedOutput { len: usize, floor: usize },

    #[error("exported buffer is {len} bytes, above the {ceiling}-byte ceiling")]
    OversizedOutput { len: usize, ceiling: usize },
}
