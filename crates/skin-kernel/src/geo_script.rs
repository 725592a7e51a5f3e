//! GeoScriptKernel: records construction as a gmsh `.geo` script.
//!
//! Every call is validated and tagged by an inner `MockKernel`, whose per-
//! dimension `max + 1` numbering matches the OpenCASCADE factory, and is
//! echoed as the equivalent `.geo` statement. The rendered script can be
//! handed to a gmsh process for meshing.

use crate::mesh_field::{Field, MeshSizing};
use crate::mock_kernel::MockKernel;
use crate::traits::Kernel;
use crate::types::*;

pub struct GeoScriptKernel {
    shadow: MockKernel,
    statements: Vec<String>,
    sizing: Option<MeshSizing>,
    mesh_dim: Option<u8>,
}

impl GeoScriptKernel {
    pub fn new() -> Self {
        Self {
            shadow: MockKernel::new(),
            statements: Vec::new(),
            sizing: None,
            mesh_dim: None,
        }
    }

    /// Append a `Mesh <dim>;` command so gmsh meshes on load.
    pub fn with_mesh_command(mut self, dim: u8) -> Self {
        self.mesh_dim = Some(dim);
        self
    }

    /// The bookkeeping kernel, for volume and cavity queries.
    pub fn shadow(&self) -> &MockKernel {
        &self.shadow
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Full `.geo` script: factory header, geometry, mesh fields, options.
    pub fn render(&self) -> String {
        let mut out = String::from("SetFactory(\"OpenCASCADE\");\n");
        for s in &self.statements {
            out.push_str(s);
            out.push('\n');
        }
        if let Some(sizing) = &self.sizing {
            out.push_str(&render_sizing(sizing));
        }
        if let Some(dim) = self.mesh_dim {
            out.push_str(&format!("Mesh {dim};\n"));
        }
        out
    }

    fn emit(&mut self, statement: String) {
        self.statements.push(statement);
    }
}

impl Default for GeoScriptKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn join_tags(tags: impl IntoIterator<Item = Tag>) -> String {
    tags.into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn dim_keyword(dim: Dim) -> &'static str {
    match dim {
        Dim::Point => "Point",
        Dim::Curve => "Curve",
        Dim::Surface => "Surface",
        Dim::Volume => "Volume",
    }
}

/// `.geo` statements for mesh fields, background field and options.
pub fn render_sizing(sizing: &MeshSizing) -> String {
    let mut out = String::new();
    for (id, field) in &sizing.fields {
        match field {
            Field::Box(b) => {
                out.push_str(&format!("Field[{id}] = Box;\n"));
                for (name, value) in [
                    ("VIn", b.v_in),
                    ("VOut", b.v_out),
                    ("XMin", b.x_min),
                    ("XMax", b.x_max),
                    ("YMin", b.y_min),
                    ("YMax", b.y_max),
                    ("ZMin", b.z_min),
                    ("ZMax", b.z_max),
                    ("Thickness", b.thickness),
                ] {
                    out.push_str(&format!("Field[{id}].{name} = {value};\n"));
                }
            }
            Field::Min { fields } => {
                out.push_str(&format!("Field[{id}] = Min;\n"));
                out.push_str(&format!(
                    "Field[{id}].FieldsList = {{{}}};\n",
                    join_tags(fields.iter().copied())
                ));
            }
        }
    }
    if let Some(bg) = sizing.background {
        out.push_str(&format!("Background Field = {bg};\n"));
    }
    for (name, value) in &sizing.options {
        out.push_str(&format!("{name} = {value};\n"));
    }
    out
}

impl Kernel for GeoScriptKernel {
    fn add_point(&mut self, x: f64, y: f64, z: f64) -> Result<Tag, KernelError> {
        let tag = self.shadow.add_point(x, y, z)?;
        self.emit(format!("Point({tag}) = {{{x}, {y}, {z}}};"));
        Ok(tag)
    }

    fn add_line(&mut self, start: Tag, end: Tag) -> Result<Tag, KernelError> {
        let tag = self.shadow.add_line(start, end)?;
        self.emit(format!("Line({tag}) = {{{start}, {end}}};"));
        Ok(tag)
    }

    fn add_wire(&mut self, curves: &[Tag]) -> Result<Tag, KernelError> {
        let tag = self.shadow.add_wire(curves)?;
        self.emit(format!(
            "Curve Loop({tag}) = {{{}}};",
            join_tags(curves.iter().copied())
        ));
        Ok(tag)
    }

    fn add_plane_surface(&mut self, wires: &[Tag]) -> Result<Tag, KernelError> {
        let tag = self.shadow.add_plane_surface(wires)?;
        self.emit(format!(
            "Plane Surface({tag}) = {{{}}};",
            join_tags(wires.iter().copied())
        ));
        Ok(tag)
    }

    fn extrude(
        &mut self,
        entities: &[DimTag],
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Vec<DimTag>, KernelError> {
        let out = self.shadow.extrude(entities, dx, dy, dz)?;
        let targets: String = entities
            .iter()
            .map(|dt| format!(" {}{{{}}};", dim_keyword(dt.dim), dt.tag))
            .collect();
        self.emit(format!("Extrude {{{dx}, {dy}, {dz}}} {{{targets} }}"));
        Ok(out)
    }

    fn add_box(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> Result<Tag, KernelError> {
        let tag = self.shadow.add_box(x, y, z, dx, dy, dz)?;
        self.emit(format!("Box({tag}) = {{{x}, {y}, {z}, {dx}, {dy}, {dz}}};"));
        Ok(tag)
    }

    fn cut(&mut self, objects: &[DimTag], tools: &[DimTag]) -> Result<Vec<DimTag>, KernelError> {
        let out = self.shadow.cut(objects, tools)?;
        self.emit(format!(
            "BooleanDifference{{ Volume{{{}}}; Delete; }}{{ Volume{{{}}}; Delete; }}",
            join_tags(objects.iter().map(|dt| dt.tag)),
            join_tags(tools.iter().map(|dt| dt.tag)),
        ));
        Ok(out)
    }

    fn synchronize(&mut self) -> Result<(), KernelError> {
        // The .geo interpreter synchronizes implicitly.
        self.shadow.synchronize()
    }

    fn entities(&self, dim: Dim) -> Vec<DimTag> {
        self.shadow.entities(dim)
    }

    fn bounding_box(&self, entity: DimTag) -> Result<[f64; 6], KernelError> {
        self.shadow.bounding_box(entity)
    }

    fn apply_mesh_sizing(&mut self, sizing: &MeshSizing) -> Result<(), KernelError> {
        self.sizing = Some(sizing.clone());
        Ok(())
    }
}
