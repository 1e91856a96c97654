use serde::{Serialize, Deserialize};

/** Color (index in the palette of the graph) */
pub type Color = usize;

/** colors used when no palette is given */
pub const DEFAULT_COLORS:[&str; 3] = ["Azul", "Amarillo", "Morado"];

/** finite ordered set of symbolic colors that can be assigned to nodes. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// names[c]: name of the color c
    names: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS.iter().map(|s| s.to_string()).collect())
    }
}

impl Palette {

    /** creates a palette from a list of names. Repeated names are only kept once. */
    pub fn new(names:Vec<String>) -> Self {
        let mut res:Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !res.contains(&name) { res.push(name); }
        }
        Self { names: res }
    }

    /// number of colors available
    pub fn len(&self) -> usize { self.names.len() }

    /// true if no color is available
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    /// name of the color c (None if c is not in the palette)
    pub fn name(&self, c:Color) -> Option<&str> {
        self.names.get(c).map(|s| s.as_str())
    }

    /// color corresponding to a name
    pub fn color(&self, name:&str) -> Option<Color> {
        self.names.iter().position(|s| s == name)
    }

    /// names of the colors, in palette order
    pub fn names(&self) -> &[String] { &self.names }

    /** parses a comma separated list of names ("Azul,Amarillo,Morado"). */
    pub fn parse(s:&str) -> Self {
        Self::new(
            s.split(',')
                .map(|e| e.trim())
                .filter(|e| !e.is_empty())
                .map(|e| e.to_string())
                .collect()
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.name(0), Some("Azul"));
        assert_eq!(palette.color("Morado"), Some(2));
        assert_eq!(palette.color("Rojo"), None);
        assert_eq!(palette.name(3), None);
    }

    #[test]
    fn test_parse_palette() {
        let palette = Palette::parse(" Rojo, Verde ,,Rojo,Azul");
        assert_eq!(palette.names(), &["Rojo", "Verde", "Azul"]);
        assert!(Palette::parse("").is_empty());
    }
}
