//! Loads positions, normals and triangle indices from Wavefront OBJ files.
//!
//! Only `v`, `vn` and triangular `f` records are kept. `vt` and comments are
//! recognized and dropped, every other keyword is ignored. Face indices are
//! converted to 0-based offsets into the position list.
//!
//! ```
//! use tri_obj::ObjLoader;
//!
//! let mut loader = ObjLoader::new();
//! let model = loader
//!     .parse(&["v 1.0 2.0 3.0", "v 4.0 5.0 6.0", "v 7.0 8.0 9.0", "f 1 2 3"])
//!     .unwrap();
//! assert_eq!(model.face_indices(), &[0, 1, 2]);
//! ```

pub mod config;
pub mod model;
pub mod wavefront_obj;

pub use config::LoaderConfig;
pub use model::{Model, Triangles};
pub use wavefront_obj::{Error, ObjLoader, ParseOutcome, RecordError, RecordKind, Result};
