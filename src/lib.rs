//! `ntransport` is a small set of libraries for Monte Carlo neutron
//! transport through slabs, volumes, and multi-region scenes
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of the workspace crates.
#[doc(inline)]
pub use ntransport_geometry as geometry;

#[doc(inline)]
pub use ntransport_material as material;

#[doc(inline)]
pub use ntransport_sampling as sampling;

#[doc(inline)]
pub use ntransport_transport as transport;

#[doc(inline)]
pub use ntransport_utils as utils;
