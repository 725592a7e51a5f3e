//! Explicit kernel session handle.

use crate::mesh_field::MeshSizing;
use crate::traits::Kernel;
use crate::types::KernelError;

/// One CAD model under construction: a kernel plus the mesh sizing that goes
/// with it.
///
/// The session owns its kernel, so two generation calls can only share a
/// model by passing the same `&mut Session` in sequence.
pub struct Session<K: Kernel> {
    kernel: K,
    mesh: MeshSizing,
}

impl<K: Kernel> Session<K> {
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            mesh: MeshSizing::new(),
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    pub fn mesh(&self) -> &MeshSizing {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut MeshSizing {
        &mut self.mesh
    }

    /// Hand the current mesh sizing to the kernel.
    pub fn commit_mesh_sizing(&mut self) -> Result<(), KernelError> {
        self.kernel.apply_mesh_sizing(&self.mesh)
    }

    /// Release the session, keeping the kernel model for downstream meshing
    /// or export.
    pub fn into_parts(self) -> (K, MeshSizing) {
        (self.kernel, self.mesh)
    }
}
