//! Element collection owned by one annotation session.

use super::element::DrawingElement;
use serde::{Deserialize, Serialize};

/// Ordered collection of elements.
///
/// Paint order is index order: the first element is the bottom layer, the last
/// is drawn on top of everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub elements: Vec<DrawingElement>,
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn from_elements(elements: Vec<DrawingElement>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DrawingElement> {
        self.elements.get(index)
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Appends an element unless `max` (> 0) elements are already present.
    ///
    /// Returns `true` if the element was added.
    pub fn try_add_element(&mut self, element: DrawingElement, max: usize) -> bool {
        if max == 0 || self.elements.len() < max {
            self.elements.push(element);
            true
        } else {
            false
        }
    }

    /// Replaces the element at `index`, returning `false` if out of range.
    pub fn replace(&mut self, index: usize, element: DrawingElement) -> bool {
        match self.elements.get_mut(index) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Option<DrawingElement> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    /// Iterates `(index, element)` from the topmost element down.
    pub fn topmost_first(&self) -> impl Iterator<Item = (usize, &DrawingElement)> {
        self.elements.iter().enumerate().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::element::{Symbol, Text};
    use crate::draw::symbol::{Glyph, SizeTier};
    use crate::geometry::Point;

    fn text(label: &str) -> DrawingElement {
        DrawingElement::Text(Text {
            anchor: Point::new(0.0, 0.0),
            text: label.to_string(),
            font_size: 16.0,
            color: RED,
            rotation: None,
        })
    }

    #[test]
    fn try_add_element_respects_limit() {
        let mut frame = Frame::new();
        assert!(frame.try_add_element(text("a"), 1));
        assert!(!frame.try_add_element(text("b"), 1));
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn topmost_first_reverses_paint_order() {
        let frame = Frame::from_elements(vec![
            text("bottom"),
            DrawingElement::Symbol(Symbol {
                anchor: Point::new(1.0, 1.0),
                glyph: Glyph::Star,
                size: SizeTier::Small,
                rotation: 0.0,
                color: RED,
            }),
            text("top"),
        ]);
        let order: Vec<usize> = frame.topmost_first().map(|(i, _)| i).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut frame = Frame::from_elements(vec![text("only")]);
        assert!(frame.remove(3).is_none());
        assert!(frame.remove(0).is_some());
        assert!(frame.is_empty());
    }
}
