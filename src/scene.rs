/*
 * Copyright 2025 James Carl
 * AGPL-3.0-only or AGPL-3.0-or-later
 *
 * This file is part of Command Cad.
 *
 * Command CAD is free software: you can redistribute it and/or modify it under the terms of
 * the GNU Affero General Public License as published by the Free Software Foundation, either
 * version 3 of the License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
 * without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
 * See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along with this
 * program. If not, see <https://www.gnu.org/licenses/>.
 */

//! Scene files describe a set of kernel objects for the in-memory kernel to hold.

use std::{collections::HashMap, fs, path::Path, rc::Rc};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    kernel::{memory::MemoryItem, SpaceType},
    runtime::values::{wrap_item, Value},
};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub items: Vec<ItemDescription>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ItemDescription {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: SpaceType,

    /// Overrides the family the kernel reports for this item.
    #[serde(default)]
    pub family: Option<SpaceType>,

    #[serde(default)]
    pub faces: usize,

    #[serde(default)]
    pub grids: usize,

    #[serde(default)]
    pub closed: bool,

    /// Name of an item declared earlier in the scene that this item places.
    #[serde(default)]
    pub instance_of: Option<String>,
}

#[derive(Debug, Default)]
pub struct Scene {
    items: HashMap<String, Rc<MemoryItem>>,
}

impl Scene {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {:?}", path))?;

        Self::parse(&text).with_context(|| format!("Failed to load scene file {:?}", path))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let description: SceneDescription = match serde_json::from_str(text) {
            Ok(description) => description,
            Err(json_error) => serde_yaml::from_str(text).map_err(|yaml_error| {
                anyhow!(
                    "Could not parse as Json or Yaml.\nJson Error: {:?}\n Yaml Error: {:?}",
                    json_error,
                    yaml_error
                )
            })?,
        };

        Self::build(description)
    }

    pub fn build(description: SceneDescription) -> Result<Self> {
        let mut items = HashMap::with_capacity(description.items.len());

        for item in description.items {
            if items.contains_key(&item.name) {
                bail!("Item `{}` is declared more than once", item.name);
            }

            let mut builder = MemoryItem::builder(item.ty)
                .face_count(item.faces)
                .grid_count(item.grids)
                .closed(item.closed);

            if let Some(family) = item.family {
                builder = builder.family(family);
            }

            if let Some(target) = item.instance_of.as_ref() {
                let target = items.get(target).with_context(|| {
                    format!(
                        "Item `{}` is an instance of `{}`, which is not declared before it",
                        item.name, target
                    )
                })?;
                builder = builder.instance_of(Rc::clone(target));
            }

            log::debug!("Scene item `{}` is a {}", item.name, item.ty);
            items.insert(item.name, builder.build());
        }

        Ok(Self { items })
    }

    pub fn get(&self, name: &str) -> Option<&Rc<MemoryItem>> {
        self.items.get(name)
    }

    /// Wraps the named item as a runtime value that holds its own counted reference.
    pub fn wrap(&self, name: &str) -> Result<Value> {
        let item = self
            .get(name)
            .with_context(|| format!("Scene does not contain an item named `{}`", name))?;

        Ok(wrap_item(item.clone()))
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::{
        kernel::{RefCounted, SpaceItem},
        runtime::{test_context, Object},
    };

    const SCENE: &str = r#"
items:
  - name: block
    type: Solid
    faces: 6
  - name: surface_mesh
    type: Mesh
    grids: 12
  - name: placement
    type: SpaceInstance
    instance_of: block
  - name: broken
    type: Line3D
    family: Mesh
"#;

    #[test]
    fn load_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SCENE.as_bytes()).unwrap();

        let scene = Scene::load(file.path()).unwrap();
        let block = scene.get("block").unwrap();
        assert_eq!(block.is_a(), SpaceType::Solid);
        assert_eq!(block.use_count(), 0);

        let broken = scene.get("broken").unwrap();
        assert_eq!(broken.is_a(), SpaceType::Line3D);
        assert_eq!(broken.family(), SpaceType::Mesh);
    }

    #[test]
    fn load_json() {
        let scene =
            Scene::parse(r#"{"items": [{"name": "wire", "type": "Arc3D", "closed": true}]}"#)
                .unwrap();
        assert_eq!(scene.get("wire").unwrap().is_a(), SpaceType::Arc3D);
    }

    #[test]
    fn missing_file() {
        let directory = tempfile::tempdir().unwrap();
        assert!(Scene::load(directory.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn instance_must_come_later() {
        let result = Scene::parse(
            r#"
items:
  - name: placement
    type: SpaceInstance
    instance_of: block
  - name: block
    type: Solid
"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn duplicate_names() {
        let result = Scene::parse(
            r#"
items:
  - name: block
    type: Solid
  - name: block
    type: Mesh
"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn unknown_type() {
        assert!(Scene::parse("items: [{name: block, type: Teapot}]").is_err());
    }

    #[test]
    fn wrap_counts_reference() {
        let scene = Scene::parse(SCENE).unwrap();

        test_context(|context, _log| {
            let value = scene.wrap("block").unwrap();
            assert_eq!(value.type_name(), "Item");
            assert_eq!(scene.get("block").unwrap().use_count(), 1);

            let result = value
                .call_method(context, "face_count", Vec::new())
                .unwrap_err();
            assert!(result.to_string().contains("does not have a method named"));

            drop(value);
            assert_eq!(scene.get("block").unwrap().use_count(), 0);
        });

        assert!(scene.wrap("teapot").is_err());
    }
}
