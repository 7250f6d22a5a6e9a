//! ListingHost: the document the annotator reads from and writes to
//!
//! The host page is a continuously mutating external collaborator. Every read
//! may come back empty and every write is scoped to a single listing element,
//! so implementations never need to coordinate across listings.

use crate::annotator::render::Badge;

/// Access to the listing rows of the page being annotated.
///
/// `Element` is a cheap handle (a DOM node reference, an index into a test
/// fixture). Handles may outlive the node they point at; operations on a
/// detached handle should quietly do nothing.
pub trait ListingHost {
    type Element;

    /// Every listing element currently present that matches the structural signature
    fn listings(&self) -> Vec<Self::Element>;

    /// Every listing element carrying the processed marker, including rows
    /// that no longer match the structural signature
    fn marked_listings(&self) -> Vec<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&self, element: &Self::Element, name: &str);

    /// The badge anchor region inside a listing, if it has one
    fn anchor(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Append a rendered badge to an anchor region
    fn append_badge(&self, anchor: &Self::Element, badge: &Badge) -> Result<(), String>;

    /// Remove every badge attached anywhere inside a listing. Returns how many went.
    fn remove_badges(&self, element: &Self::Element) -> usize;
}
