//! Symbol dictionary: the fixed element → (numbers, colors, directions)
//! lookup, plus the chart-specific set of favorable elements.

use serde::{Deserialize, Serialize};

use crate::types::Element;

/// Symbol sets associated with one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSymbols {
    pub element: Element,
    pub numbers: Vec<u8>,
    pub colors: Vec<String>,
    pub directions: Vec<String>,
}

/// Symbol lookup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolConfig {
    /// Elements the chart considers favorable; only these produce symbols.
    pub favorable_elements: Vec<Element>,
    /// The element → symbols dictionary.
    pub entries: Vec<ElementSymbols>,
    /// Entry caps per symbol kind.
    pub number_cap: usize,
    pub color_cap: usize,
    pub direction_cap: usize,
}

impl SymbolConfig {
    pub fn lookup(&self, element: Element) -> Option<&ElementSymbols> {
        self.entries.iter().find(|e| e.element == element)
    }

    pub fn is_favorable(&self, element: Element) -> bool {
        self.favorable_elements.contains(&element)
    }
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            // Neutral default: every element maps. Charts narrow this down.
            favorable_elements: Element::all().to_vec(),
            entries: vec![
                ElementSymbols {
                    element: Element::Wood,
                    numbers: vec![3, 8],
                    colors: vec!["green".into(), "teal".into()],
                    directions: vec!["east".into()],
                },
                ElementSymbols {
                    element: Element::Fire,
                    numbers: vec![2, 7],
                    colors: vec!["red".into(), "purple".into()],
                    directions: vec!["south".into()],
                },
                ElementSymbols {
                    element: Element::Earth,
                    numbers: vec![5, 10],
                    colors: vec!["yellow".into(), "ochre".into()],
                    directions: vec!["center".into()],
                },
                ElementSymbols {
                    element: Element::Metal,
                    numbers: vec![4, 9],
                    colors: vec!["white".into(), "gold".into()],
                    directions: vec!["west".into()],
                },
                ElementSymbols {
                    element: Element::Water,
                    numbers: vec![1, 6],
                    colors: vec!["black".into(), "blue".into()],
                    directions: vec!["north".into()],
                },
            ],
            number_cap: 5,
            color_cap: 3,
            direction_cap: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_element_has_an_entry() {
        let config = SymbolConfig::default();
        for element in Element::all() {
            assert!(config.lookup(element).is_some(), "missing {}", element);
        }
    }

    #[test]
    fn test_favorability_narrows() {
        let mut config = SymbolConfig::default();
        config.favorable_elements = vec![Element::Water];
        assert!(config.is_favorable(Element::Water));
        assert!(!config.is_favorable(Element::Fire));
    }
}
