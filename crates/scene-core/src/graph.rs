//! Arena-backed transform hierarchy holding the scene's strands.
//!
//! Node 0 is always the root. World transforms are composed parent-first on
//! demand; nothing is cached, so a node's world transform is always consistent
//! with the locals of its ancestors.

use crate::error::SceneError;
use crate::strand::{Material, Strand, StrandBuffer};
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrandId(usize);

impl StrandId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Translation, rotation about +Z and scale, applied scale-first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_z: f32,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation_z: 0.0,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_z(self.rotation_z),
            self.translation,
        )
    }

    /// Decompose a matrix produced by composing z-rotations, translations
    /// and positive scales.
    pub fn from_matrix(m: Mat4) -> Self {
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        Self {
            translation,
            rotation_z: 2.0 * rotation.z.atan2(rotation.w),
            scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub local: Transform,
    pub visible: bool,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    strands: Vec<Strand>,
    generation: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                local: Transform::IDENTITY,
                visible: true,
                parent: None,
                children: SmallVec::new(),
            }],
            strands: Vec::new(),
            generation: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Bumped whenever strands are removed; strand ids from an older
    /// generation must not be reused.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn add_node(&mut self, parent: NodeId, local: Transform) -> Result<NodeId, SceneError> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            local,
            visible: true,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id))
    }

    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let mut m = self.node(id)?.local.matrix();
        let mut cur = self.node(id)?.parent;
        while let Some(p) = cur {
            let node = self.node(p)?;
            m = node.local.matrix() * m;
            cur = node.parent;
        }
        Ok(m)
    }

    /// True when the node hangs off the root and it and all its ancestors
    /// are visible.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            match self.nodes.get(n.0) {
                Some(node) if node.visible => {
                    if n == self.root() {
                        return true;
                    }
                    cur = node.parent;
                }
                _ => return false,
            }
        }
        false
    }

    pub fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        let mut cur = self.nodes.get(of.0).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes.get(p.0).and_then(|n| n.parent);
        }
        false
    }

    pub fn detach(&mut self, id: NodeId) -> Result<(), SceneError> {
        if let Some(parent) = self.node(id)?.parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.nodes[id.0].parent = None;
        }
        Ok(())
    }

    pub fn attach(&mut self, id: NodeId, parent: NodeId) -> Result<(), SceneError> {
        self.node(parent)?;
        if id == parent || self.is_ancestor(id, parent) || id == self.root() {
            return Err(SceneError::ReparentCycle { node: id, parent });
        }
        self.detach(id)?;
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        Ok(())
    }

    /// Move `id` under `new_parent` without changing where it appears.
    ///
    /// The world transform is read under the old parent before anything is
    /// detached, then written back as the equivalent local transform under
    /// the new parent.
    pub fn reparent_preserving_world(
        &mut self,
        id: NodeId,
        new_parent: NodeId,
    ) -> Result<(), SceneError> {
        let world = self.world_matrix(id)?;
        self.attach(id, new_parent)?;
        let parent_world = self.world_matrix(new_parent)?;
        self.nodes[id.0].local = Transform::from_matrix(parent_world.inverse() * world);
        Ok(())
    }

    pub fn add_strand(
        &mut self,
        node: NodeId,
        points: Vec<Vec3>,
        material: Material,
    ) -> Result<StrandId, SceneError> {
        self.node(node)?;
        let id = StrandId(self.strands.len());
        self.strands.push(Strand {
            node,
            buffer: StrandBuffer::from_points(points),
            material,
        });
        Ok(id)
    }

    pub fn strand(&self, id: StrandId) -> Result<&Strand, SceneError> {
        self.strands.get(id.0).ok_or(SceneError::UnknownStrand(id))
    }

    pub fn strand_mut(&mut self, id: StrandId) -> Result<&mut Strand, SceneError> {
        self.strands
            .get_mut(id.0)
            .ok_or(SceneError::UnknownStrand(id))
    }

    #[inline]
    pub fn strand_count(&self) -> usize {
        self.strands.len()
    }

    pub fn strands(&self) -> impl Iterator<Item = (StrandId, &Strand)> {
        self.strands.iter().enumerate().map(|(i, s)| (StrandId(i), s))
    }

    pub fn strands_mut(&mut self) -> impl Iterator<Item = (StrandId, &mut Strand)> {
        self.strands
            .iter_mut()
            .enumerate()
            .map(|(i, s)| (StrandId(i), s))
    }

    pub fn strands_of(&self, node: NodeId) -> impl Iterator<Item = (StrandId, &Strand)> {
        self.strands().filter(move |(_, s)| s.node == node)
    }

    /// Drop every strand owned by `node`, returning how many were removed.
    pub fn remove_strands_of(&mut self, node: NodeId) -> usize {
        let before = self.strands.len();
        self.strands.retain(|s| s.node != node);
        let removed = before - self.strands.len();
        if removed > 0 {
            self.generation += 1;
        }
        removed
    }

    pub fn world_points(&self, id: StrandId) -> Result<Vec<Vec3>, SceneError> {
        let strand = self.strand(id)?;
        let m = self.world_matrix(strand.node)?;
        Ok(strand
            .buffer
            .points()
            .iter()
            .map(|p| m.transform_point3(*p))
            .collect())
    }
}
