//! Query facade for Wikigraph.
//!
//! Front ends deserialize requests into the types in [`requests`], call the
//! matching [`QueryFacade`] method and serialize either the result or an
//! [`ErrorResponse`].

#![doc = include_str!("../README.md")]

pub mod config;
pub mod facade;
pub mod requests;
pub mod response;

pub use config::QueryConfig;
pub use facade::QueryFacade;
pub use requests::{
    AnalyticsRequest, PageRankRequest, PathRequest, RecommendationRequest, RelationshipsRequest,
    SearchRequest, SimilarityRequest, SubgraphRequest,
};
pub use response::{
    ErrorResponse, GraphSummary, RecommendationResponse, RelationshipsResponse, SearchResponse,
    SimilarityResponse,
};
