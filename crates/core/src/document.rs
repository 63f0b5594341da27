//! Renderer-facing output document.
//!
//! Field names, item tags and the fixed viewport match what the graphing
//! renderer accepts on paste, so they must not change.

use serde::{Serialize, Serializer};

pub const DOCUMENT_VERSION: u32 = 11;
pub const RANDOM_SEED: &str = "038ada9396ae4919ad0383b8fe134eb0";
pub const DEFAULT_COLOR: &str = "#c74440";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,
    pub random_seed: String,
    pub graph: Graph,
    pub expressions: ItemList,
    pub include_function_parameters_in_random_seed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            xmin: -10.0,
            ymin: -7.595766129032258,
            xmax: 10.0,
            ymax: 7.595766129032258,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemList {
    pub list: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Item {
    #[serde(rename = "expression")]
    Formula(Formula),
    #[serde(rename = "folder")]
    Folder(Folder),
    #[serde(rename = "text")]
    Note(Note),
}

impl Item {
    pub fn id(&self) -> u32 {
        match self {
            Item::Formula(f) => f.id,
            Item::Folder(f) => f.id,
            Item::Note(n) => n.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub id: u32,
    pub color: String,
    pub latex: String,
    pub line_style: String,
    pub line_opacity: String,
    pub line_width: String,
    /// Enclosing folder id, 0 for none.
    #[serde(serialize_with = "serialize_folder_id")]
    pub folder_id: u32,
}

impl Formula {
    pub fn new(id: u32, folder_id: u32) -> Self {
        Formula {
            id,
            color: DEFAULT_COLOR.to_owned(),
            latex: String::new(),
            line_style: "SOLID".to_owned(),
            line_opacity: "1".to_owned(),
            line_width: "2.5".to_owned(),
            folder_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub id: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: u32,
    pub text: String,
}

/// The renderer keys folders by string id; "no folder" stays the number 0.
fn serialize_folder_id<S: Serializer>(id: &u32, s: S) -> Result<S::Ok, S::Error> {
    if *id == 0 {
        s.serialize_u32(0)
    } else {
        s.serialize_str(&id.to_string())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            version: DOCUMENT_VERSION,
            random_seed: RANDOM_SEED.to_owned(),
            graph: Graph {
                viewport: Viewport::default(),
            },
            expressions: ItemList { list: Vec::new() },
            include_function_parameters_in_random_seed: true,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.expressions.list
    }

    /// Append an empty formula and return its index.
    pub fn push_formula(&mut self, id: u32, folder_id: u32) -> usize {
        self.expressions.list.push(Item::Formula(Formula::new(id, folder_id)));
        self.expressions.list.len() - 1
    }

    /// Replace the item at `index`, keeping the slot (and so the order).
    pub fn replace(&mut self, index: usize, item: Item) {
        if let Some(slot) = self.expressions.list.get_mut(index) {
            *slot = item;
        }
    }

    /// Set the latex of the formula at `index`; other item kinds are left
    /// alone.
    pub fn set_latex(&mut self, index: usize, latex: String) {
        if let Some(Item::Formula(f)) = self.expressions.list.get_mut(index) {
            f.latex = latex;
        }
    }

    /// Formulas in document order.
    pub fn formulas(&self) -> impl Iterator<Item = &Formula> {
        self.expressions.list.iter().filter_map(|item| match item {
            Item::Formula(f) => Some(f),
            _ => None,
        })
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_shape() {
        let v = Document::new().to_json_value();
        assert_eq!(v["version"], json!(11));
        assert_eq!(v["randomSeed"], json!(RANDOM_SEED));
        assert_eq!(v["graph"]["viewport"]["xmin"], json!(-10.0));
        assert_eq!(v["graph"]["viewport"]["ymax"], json!(7.595766129032258));
        assert_eq!(v["expressions"]["list"], json!([]));
        assert_eq!(v["includeFunctionParametersInRandomSeed"], json!(true));
    }

    #[test]
    fn formula_fields() {
        let mut doc = Document::new();
        let idx = doc.push_formula(1, 0);
        doc.set_latex(idx, "x=5".into());
        let v = doc.to_json_value();
        assert_eq!(
            v["expressions"]["list"][0],
            json!({
                "type": "expression",
                "id": 1,
                "color": "#c74440",
                "latex": "x=5",
                "lineStyle": "SOLID",
                "lineOpacity": "1",
                "lineWidth": "2.5",
                "folderId": 0
            })
        );
    }

    #[test]
    fn folder_id_is_a_string_when_set() {
        let mut doc = Document::new();
        doc.push_formula(2, 1);
        assert_eq!(doc.to_json_value()["expressions"]["list"][0]["folderId"], json!("1"));
    }

    #[test]
    fn replace_keeps_position() {
        let mut doc = Document::new();
        let a = doc.push_formula(1, 0);
        doc.push_formula(2, 0);
        doc.replace(
            a,
            Item::Folder(Folder {
                id: 1,
                title: "A".into(),
            }),
        );
        let v = doc.to_json_value();
        assert_eq!(v["expressions"]["list"][0], json!({"type": "folder", "id": 1, "title": "A"}));
        assert_eq!(doc.items()[1].id(), 2);
        assert_eq!(doc.formulas().count(), 1);
    }

    #[test]
    fn note_tag_is_text() {
        let mut doc = Document::new();
        let idx = doc.push_formula(1, 0);
        doc.replace(
            idx,
            Item::Note(Note {
                id: 1,
                text: "hi".into(),
            }),
        );
        assert_eq!(
            doc.to_json_value()["expressions"]["list"][0],
            json!({"type": "text", "id": 1, "text": "hi"})
        );
    }
}
