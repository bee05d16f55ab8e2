//! # hmtrack-render
//!
//! Rendering backends for the oil-service dashboard.
//!
//! This crate provides:
//! - Plain or coloured terminal tables
//! - HTML tables with inline tier highlighting
//! - Excel workbooks with tier fills
//!
//! Every backend consumes a [`DisplayModel`](hmtrack_core::DisplayModel) and
//! implements [`Renderer`](hmtrack_core::Renderer). JSON output needs no
//! backend: the display model serializes directly.
//!
//! ## Example
//!
//! ```rust
//! use hmtrack_core::{DisplayModel, Renderer};
//! use hmtrack_render::{HtmlRenderer, TextRenderer};
//!
//! let model = DisplayModel::default();
//! let text = TextRenderer::new().render(&model).unwrap();
//! assert!(text.contains("Critical: 0"));
//!
//! let html = HtmlRenderer::new().render(&model).unwrap();
//! assert!(html.contains("<table"));
//! ```

pub mod excel;
pub mod html;
pub mod text;

pub use excel::ExcelRenderer;
pub use html::HtmlRenderer;
pub use text::TextRenderer;
