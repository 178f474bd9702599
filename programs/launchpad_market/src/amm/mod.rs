//! # Automated Market Maker (AMM) Module
//!
//! Prices YES/NO share purchases with a two-reserve **constant-product**
//! curve (`x * y = k`).
//!
//! ```text
//!   NO reserve ▲
//!              │╲
//!              │ ╲
//!              │  ╲        x · y = k
//!              │   ╲__
//!              │      ╲____
//!              │           ‾‾‾‾‾──────
//!              └──────────────────────▶ YES reserve
//!
//!   A YES buy moves the pool up-left along the curve:
//!   the NO reserve grows by the deposit and the YES
//!   reserve shrinks by the shares issued.
//! ```

pub mod constant_product;

pub use constant_product::*;
