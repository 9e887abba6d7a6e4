// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Stigmergy Core
//!
//! Foundational building blocks shared by the stigmergy routing crates. The
//! crate is intentionally small: it holds the primitives that the graph model,
//! the ant colony and the AntNet variant all need, without knowing anything
//! about graphs or ants themselves.
//!
//! ## Modules
//!
//! - `math`: Numeric containers. `SlidingWindow<T>` is a bounded FIFO of
//!   floating point observations with cheap `mean`, `min` and `sum` read-outs,
//!   used to keep recent trip times per routing destination.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`) used for
//!   nodes, edges and monitors.
//!
//! Refer to each module for detailed APIs and examples.

pub mod math;
pub mod utils;
