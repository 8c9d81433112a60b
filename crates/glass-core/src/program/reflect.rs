use std::collections::HashMap;

use crate::device::GpuDevice;
use crate::error::GlassError;
use crate::uniform::{UniformSetter, UniformSlot};

use super::AttributeSlot;

/// Removes the first `[N]` subscript not followed by a `.` member access.
///
/// Drivers report array uniforms as `lights[0]`; they are addressed by base
/// name. Subscripts inside struct paths (`lights[0].color`) are kept.
pub fn strip_array_subscript(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut start = 0;
    while let Some(found) = name[start..].find('[') {
        let open = start + found;
        let digits = bytes[open + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        let close = open + 1 + digits;
        if digits > 0 && bytes.get(close) == Some(&b']') && bytes.get(close + 1) != Some(&b'.') {
            let mut stripped = String::with_capacity(name.len());
            stripped.push_str(&name[..open]);
            stripped.push_str(&name[close + 1..]);
            return stripped;
        }
        start = open + 1;
    }
    name.to_owned()
}

/// Builds the uniform table of a linked program.
///
/// Fails on the first uniform whose type has no setter.
pub(super) fn reflect_uniforms<D: GpuDevice>(
    device: &D,
    program: D::Program,
) -> Result<HashMap<String, UniformSlot<D::UniformLocation>>, GlassError> {
    let count = device.active_uniform_count(program);
    let mut uniforms = HashMap::with_capacity(count as usize);

    for index in 0..count {
        let Some(active) = device.active_uniform(program, index) else { continue };
        let name = strip_array_subscript(&active.name);

        let setter = UniformSetter::resolve(&name, active.type_tag, active.size > 1)
            .inspect_err(|e| log::error!("{e}"))?;

        // Uniforms inside blocks report no location; there is nothing to set.
        let Some(location) = device.uniform_location(program, &name) else {
            log::debug!("uniform `{name}` has no location; skipped");
            continue;
        };

        log::debug!(
            "uniform `{}`: {}{} -> {:?}",
            name,
            setter.kind(),
            if setter.is_array() { "[]" } else { "" },
            location
        );
        uniforms.insert(name, UniformSlot::new(location, setter));
    }

    Ok(uniforms)
}

/// Builds the attribute table and enables every attribute array once.
pub(super) fn reflect_attributes<D: GpuDevice>(
    device: &D,
    program: D::Program,
) -> HashMap<String, AttributeSlot> {
    let count = device.active_attribute_count(program);
    let mut attributes = HashMap::with_capacity(count as usize);

    for index in 0..count {
        let Some(active) = device.active_attribute(program, index) else { continue };

        // Built-ins (gl_VertexID, gl_InstanceID) are active but unbindable.
        let Some(location) = device.attrib_location(program, &active.name) else {
            log::debug!("attribute `{}` has no location; skipped", active.name);
            continue;
        };

        device.enable_vertex_attrib_array(location);
        log::debug!("attribute `{}` -> {}", active.name, location);
        attributes.insert(active.name, AttributeSlot::new(location));
    }

    attributes
}
