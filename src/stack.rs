use crate::catalog::Product;

/// Position in the product queue together with the loop preference.
///
/// The cursor counts committed decisions. With looping disabled it may reach
/// `products.len()`, which marks the queue as exhausted until a restart.
#[derive(Debug, Clone, PartialEq)]
pub struct CardQueue {
    products: Vec<Product>,
    cursor: usize,
    looping: bool,
}

impl CardQueue {
    pub fn new(products: Vec<Product>, looping: bool) -> Self {
        Self {
            products,
            cursor: 0,
            looping,
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Exhausted means every product was decided on while looping was off.
    /// An empty catalog is not exhausted, it never had a front card at all.
    pub fn is_exhausted(&self) -> bool {
        !self.looping && !self.products.is_empty() && self.cursor >= self.products.len()
    }

    /// The upcoming cards, front first. With looping on this always yields
    /// `size` cards, repeating the catalog when it is shorter than the
    /// window. With looping off the window truncates instead of wrapping
    /// past the end of the queue.
    pub fn window(&self, size: usize) -> Vec<&Product> {
        let len = self.products.len();
        if len == 0 {
            return Vec::new();
        }
        let mut cards = Vec::new();
        for step in 0..size {
            let index = (self.cursor + step) % len;
            if !self.looping && index < self.cursor {
                break;
            }
            cards.push(&self.products[index]);
        }
        cards
    }

    pub fn front(&self) -> Option<&Product> {
        self.window(1).into_iter().next()
    }

    /// Moves past the front card. A no-op unless `product_id` still names
    /// the front card, which makes a late duplicate of an already handled
    /// decision harmless.
    pub fn advance(&mut self, product_id: &str) {
        let len = self.products.len();
        if len == 0 {
            return;
        }
        match self.front() {
            Some(front) if front.id == product_id => {}
            _ => return,
        }
        let next = (self.cursor + 1) % len;
        self.cursor = if next == 0 && !self.looping { len } else { next };
    }

    pub fn reset_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn set_loop(&mut self, enabled: bool) {
        self.looping = enabled;
    }
}
