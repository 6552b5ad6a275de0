//! Error types for the wordpath core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.
//! "No path" and "no pair found" are ordinary return values, not errors.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by path finding, path validation and pair generation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// A requested word is not a node of the graph.
    #[error("word `{word}` is not present in the graph")]
    NodeNotFound {
        /// The normalised word that could not be found.
        word: String,
    },
    /// An edge declared a similarity above 1, which yields a negative cost.
    #[error("edge `{from}` -> `{to}` has similarity {similarity} and a negative cost")]
    NegativeEdgeCost {
        /// Source word of the offending edge.
        from: String,
        /// Target word of the offending edge.
        to: String,
        /// The similarity as stored in the graph.
        similarity: f64,
    },
    /// An edge declared a NaN or infinite similarity.
    #[error("edge `{from}` -> `{to}` has a non-finite similarity")]
    NonFiniteSimilarity {
        /// Source word of the offending edge.
        from: String,
        /// Target word of the offending edge.
        to: String,
    },
    /// A path must contain at least one word.
    #[error("a path must contain at least one word")]
    EmptyPath,
    /// Two consecutive words of a path are not joined by a declared edge.
    #[error("`{from}` has no edge to `{to}`")]
    MissingEdge {
        /// Word the step leaves from.
        from: String,
        /// Word the step tries to reach.
        to: String,
    },
    /// Puzzle constraints or a batch plan are inconsistent.
    #[error("invalid puzzle constraints: {reason}")]
    InvalidConstraints {
        /// Human-readable explanation of the inconsistency.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`EngineError`] variants.
    enum EngineErrorCode for EngineError {
        /// A requested word is not a node of the graph.
        NodeNotFound => NodeNotFound { .. } => "ENGINE_NODE_NOT_FOUND",
        /// An edge yields a negative traversal cost.
        NegativeEdgeCost => NegativeEdgeCost { .. } => "ENGINE_NEGATIVE_EDGE_COST",
        /// An edge carries a non-finite similarity.
        NonFiniteSimilarity => NonFiniteSimilarity { .. } => "ENGINE_NON_FINITE_SIMILARITY",
        /// A path contained no words.
        EmptyPath => EmptyPath => "ENGINE_EMPTY_PATH",
        /// A path step is not backed by an edge.
        MissingEdge => MissingEdge { .. } => "ENGINE_MISSING_EDGE",
        /// Constraints or batch plan failed validation.
        InvalidConstraints => InvalidConstraints { .. } => "ENGINE_INVALID_CONSTRAINTS",
    }
}

impl EngineError {
    pub(crate) fn invalid_constraints(reason: impl Into<String>) -> Self {
        Self::InvalidConstraints {
            reason: reason.into(),
        }
    }
}

/// An error produced while decoding a graph document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphLoadError {
    /// The document was not valid JSON or did not match the node schema.
    #[error("graph document is malformed: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level JSON value was not an object.
    #[error("graph document must be a JSON object")]
    NotAnObject,
    /// A layout coordinate did not have exactly two components.
    #[error("layout for `{word}` has {len} components, expected 2")]
    InvalidLayout {
        /// Word whose layout was rejected.
        word: String,
        /// Number of components found.
        len: usize,
    },
    /// A word normalised to the empty string.
    #[error("graph contains an empty word")]
    EmptyWord,
}

define_error_codes! {
    /// Stable codes describing [`GraphLoadError`] variants.
    enum GraphLoadErrorCode for GraphLoadError {
        /// The document was not valid JSON or did not match the node schema.
        Json => Json(..) => "GRAPH_LOAD_JSON",
        /// The top-level JSON value was not an object.
        NotAnObject => NotAnObject => "GRAPH_LOAD_NOT_AN_OBJECT",
        /// A layout coordinate did not have exactly two components.
        InvalidLayout => InvalidLayout { .. } => "GRAPH_LOAD_INVALID_LAYOUT",
        /// A word normalised to the empty string.
        EmptyWord => EmptyWord => "GRAPH_LOAD_EMPTY_WORD",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, EngineError>;
