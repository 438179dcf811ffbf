//! Plain-value scene tree returned by the builders.
//!
//! A `Node` is a kind tag, a local transform, an optional solid shape with its
//! surface role, and children. Nothing here renders; consumers walk the tree.
//!
//! Conventions
//! - Y is up, X runs across the stand front (row axis), +Z points out of the
//!   front face (depth axis). Units are centimeters.
//! - Solids are centered on their node origin.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::materials::SurfaceRole;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Group,
    Base,
    Wall,
    Pillar,
    Panel,
    Shelf,
    Tier,
    Support,
    Bracket,
    MountPoint,
    Turntable,
    Product,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    #[serde(rename_all = "camelCase")]
    Box { width: f64, height: f64, depth: f64 },
    /// Axis along local Y.
    #[serde(rename_all = "camelCase")]
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        segments: u32,
    },
}

impl Shape {
    #[inline]
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        Self::Box {
            width,
            height,
            depth,
        }
    }

    #[inline]
    pub fn cylinder(radius: f64, height: f64, segments: u32) -> Self {
        Self::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height,
            segments,
        }
    }

    /// Half extents of the local bounding box.
    pub fn half_extents(&self) -> Vector3<f64> {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => Vector3::new(width, height, depth) * 0.5,
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let r = radius_top.max(radius_bottom);
                Vector3::new(r, height * 0.5, r)
            }
        }
    }
}

/// Local rigid transform (no scale; sizes live in `Shape`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[inline]
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
        }
    }

    #[inline]
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Rotation about +Y (counterclockwise seen from above).
    #[inline]
    pub fn rotated_y(mut self, angle: f64) -> Self {
        self.rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle) * self.rotation;
        self
    }

    /// Rotation about +X, applied after any existing rotation.
    #[inline]
    pub fn rotated_x(mut self, angle: f64) -> Self {
        self.rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle) * self.rotation;
        self
    }

    #[inline]
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }
}

/// Grid address of a product instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSlot {
    /// Shelf or tier index, bottom up.
    pub level: u32,
    /// Front-face (row axis) index, left to right.
    pub row: u32,
    /// Back-to-back index, front to back.
    pub depth_index: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SurfaceRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<ProductSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Group,
            transform: Transform::identity(),
            shape: None,
            role: None,
            slot: None,
            children: Vec::new(),
        }
    }

    pub fn solid(
        name: impl Into<String>,
        kind: NodeKind,
        shape: Shape,
        role: SurfaceRole,
        transform: Transform,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            transform,
            shape: Some(shape),
            role: Some(role),
            slot: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    pub fn with_slot(mut self, slot: ProductSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    #[inline]
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Depth-first, parent before children.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.walk().iter().filter(|n| n.kind == kind).count()
    }

    pub fn find(&self, name: &str) -> Option<&Node> {
        self.walk().into_iter().find(|n| n.name == name)
    }

    /// World-space bounds of every solid, in walk order.
    pub fn world_bounds(&self) -> Vec<(&Node, Aabb)> {
        let mut out = Vec::new();
        collect_bounds(self, Isometry3::identity(), &mut out);
        out
    }

    /// Union of all solid bounds; `None` for a tree without solids.
    pub fn total_bounds(&self) -> Option<Aabb> {
        self.world_bounds()
            .into_iter()
            .map(|(_, b)| b)
            .reduce(|a, b| a.union(&b))
    }
}

fn collect_bounds<'a>(node: &'a Node, parent: Isometry3<f64>, out: &mut Vec<(&'a Node, Aabb)>) {
    let world = parent * node.transform.to_isometry();
    if let Some(shape) = node.shape {
        out.push((node, Aabb::of_box(&world, shape.half_extents())));
    }
    for child in &node.children {
        collect_bounds(child, world, out);
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Bounds of a centered box with half extents `h` placed by `iso`.
    pub fn of_box(iso: &Isometry3<f64>, h: Vector3<f64>) -> Self {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let p = iso * Point3::new(sx * h.x, sy * h.y, sz * h.z);
                    min = min.inf(&p);
                    max = max.sup(&p);
                }
            }
        }
        Self { min, max }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Containment with slack `eps` on every side.
    pub fn contains(&self, other: &Aabb, eps: f64) -> bool {
        (0..3).all(|i| other.min[i] >= self.min[i] - eps && other.max[i] <= self.max[i] + eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(name: &str, t: Transform) -> Node {
        Node::solid(
            name,
            NodeKind::Base,
            Shape::cuboid(2.0, 2.0, 2.0),
            SurfaceRole::Structure,
            t,
        )
    }

    #[test]
    fn walk_visits_parents_first_in_order() {
        let mut root = Node::group("root");
        let mut a = Node::group("a");
        a.push(unit_box("a1", Transform::identity()));
        root.push(a);
        root.push(unit_box("b", Transform::identity()));
        let names: Vec<_> = root.walk().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["root", "a", "a1", "b"]);
        assert_eq!(root.count_kind(NodeKind::Group), 2);
        assert!(root.find("a1").is_some());
        assert!(root.find("zz").is_none());
    }

    #[test]
    fn bounds_compose_parent_transforms() {
        let mut root = Node::group("root").with_transform(Transform::at(10.0, 0.0, 0.0));
        root.push(unit_box("child", Transform::at(0.0, 5.0, 0.0)));
        let (_, b) = root.world_bounds()[0];
        assert!((b.min - Point3::new(9.0, 4.0, -1.0)).norm() < 1e-12);
        assert!((b.max - Point3::new(11.0, 6.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn rotated_box_bounds_grow() {
        let t = Transform::identity().rotated_y(std::f64::consts::FRAC_PI_4);
        let b = Aabb::of_box(&t.to_isometry(), Vector3::new(1.0, 1.0, 1.0));
        let s = b.size();
        assert!((s.x - 2.0 * 2f64.sqrt()).abs() < 1e-12);
        assert!((s.y - 2.0).abs() < 1e-12);
        assert!((s.z - 2.0 * 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn cylinder_extents_use_larger_radius() {
        let c = Shape::Cylinder {
            radius_top: 1.0,
            radius_bottom: 3.0,
            height: 4.0,
            segments: 16,
        };
        assert_eq!(c.half_extents(), Vector3::new(3.0, 2.0, 3.0));
    }

    #[test]
    fn node_json_shape() {
        let n = unit_box("b", Transform::at(1.0, 2.0, 3.0));
        let v = serde_json::to_value(&n).unwrap();
        assert_eq!(v["kind"], "base");
        assert_eq!(v["shape"]["type"], "box");
        assert_eq!(v["transform"]["translation"], serde_json::json!([1.0, 2.0, 3.0]));
        assert!(v.get("children").is_none());
        let back: Node = serde_json::from_value(v).unwrap();
        assert_eq!(back, n);
    }
}
