use glam::Vec3;

/// An ordered set of 3-D points approximating one silhouette.
///
/// All clouds in a [`crate::shapes::ShapeLibrary`] have the same length, so
/// index `i` of one cloud always corresponds to index `i` of every other.
pub type PointCloud = Vec<Vec3>;
