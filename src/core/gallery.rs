//! Index state for the project image carousel and its lightbox.
//!
//! Both wrap circularly, so any sequence of `next`/`prev` calls stays in
//! bounds. A gallery always holds at least one image; an empty image list
//! has no carousel at all.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Option<Self> {
        Carousel::starting_at(len, 0)
    }

    /// An out-of-range start wraps modulo `len`.
    pub fn starting_at(len: usize, index: usize) -> Option<Self> {
        (len > 0).then(|| Carousel {
            index: index % len,
            len,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next_index(&self) -> usize {
        (self.index + 1) % self.len
    }

    pub fn prev_index(&self) -> usize {
        (self.index + self.len - 1) % self.len
    }

    pub fn next(&mut self) -> usize {
        self.index = self.next_index();
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = self.prev_index();
        self.index
    }

    pub fn select(&mut self, index: usize) -> usize {
        self.index = index % self.len;
        self.index
    }

    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            next: self.next_index(),
            prev: self.prev_index(),
            count: self.len,
        }
    }
}

/// Full-screen viewer with its own index, seeded from the gallery on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    carousel: Carousel,
    open: bool,
}

impl Lightbox {
    pub fn closed(len: usize) -> Option<Self> {
        Carousel::new(len).map(|carousel| Lightbox {
            carousel,
            open: false,
        })
    }

    pub fn open_from(&mut self, gallery: &Carousel) {
        self.open_at(gallery.index());
    }

    pub fn open_at(&mut self, index: usize) {
        self.carousel.select(index);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.carousel.index()
    }

    pub fn next(&mut self) -> usize {
        self.carousel.next()
    }

    pub fn prev(&mut self) -> usize {
        self.carousel.prev()
    }

    pub fn position(&self) -> Position {
        self.carousel.position()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub index: usize,
    pub next: usize,
    pub prev: usize,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_prev_wrap() {
        let mut carousel = Carousel::new(3).unwrap();
        assert_eq!(carousel.prev(), 2);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.next(), 2);
        assert_eq!(carousel.next(), 0);
    }

    #[test]
    fn n_steps_return_to_start() {
        for len in 1..=12 {
            for start in 0..len {
                let mut carousel = Carousel::starting_at(len, start).unwrap();
                for _ in 0..len {
                    carousel.next();
                }
                assert_eq!(carousel.index(), start, "len {} start {}", len, start);
                for _ in 0..len {
                    carousel.prev();
                }
                assert_eq!(carousel.index(), start);
            }
        }
    }

    #[test]
    fn single_image_is_a_no_op() {
        let mut carousel = Carousel::new(1).unwrap();
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 0);
        assert_eq!(
            carousel.position(),
            Position {
                index: 0,
                next: 0,
                prev: 0,
                count: 1
            }
        );
    }

    #[test]
    fn empty_gallery_has_no_carousel() {
        assert!(Carousel::new(0).is_none());
        assert!(Lightbox::closed(0).is_none());
    }

    #[test]
    fn out_of_range_start_wraps() {
        assert_eq!(Carousel::starting_at(4, 9).unwrap().index(), 1);
    }

    #[test]
    fn lightbox_is_independent_of_gallery() {
        let mut gallery = Carousel::starting_at(5, 3).unwrap();
        let mut lightbox = Lightbox::closed(5).unwrap();
        assert!(!lightbox.is_open());

        lightbox.open_from(&gallery);
        assert!(lightbox.is_open());
        assert_eq!(lightbox.index(), 3);

        assert_eq!(lightbox.next(), 4);
        assert_eq!(lightbox.next(), 0);
        assert_eq!(gallery.index(), 3);

        gallery.prev();
        assert_eq!(lightbox.index(), 0);

        lightbox.close();
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.prev(), 4);
    }
}
