use super::keys::KeyEvent;

/// Default capacity of the engine-facing event queue.
pub const QUEUE_CAPACITY: usize = 16;

/// Fixed-capacity FIFO of key events.
///
/// When full, new events are rejected and everything already queued is
/// kept, so a slow consumer never sees a release without its press.
pub struct EventQueue<const N: usize = QUEUE_CAPACITY> {
    slots: [Option<KeyEvent>; N],
    head: usize,
    len: usize,
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
            head: 0,
            len: 0,
        }
    }

    /// Append `event`, handing it back if the queue is full.
    pub fn try_push(&mut self, event: KeyEvent) -> Result<(), KeyEvent> {
        if self.len == N {
            return Err(event);
        }
        let tail = (self.head + self.len) % N;
        self.slots[tail] = Some(event);
        self.len += 1;
        Ok(())
    }

    /// Remove the oldest event.
    pub fn pop(&mut self) -> Option<KeyEvent> {
        if self.len == 0 {
            return None;
        }
        let event = self.slots[self.head].take();
        self.head = (self.head + 1) % N;
        self.len -= 1;
        event
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn clear(&mut self) {
        self.slots = [None; N];
        self.head = 0;
        self.len = 0;
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::KeyCode;

    fn ev(n: u8) -> KeyEvent {
        KeyEvent::pressed(KeyCode(n))
    }

    #[test]
    fn new_is_empty() {
        let mut q: EventQueue = EventQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.capacity(), 16);
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn fifo_order() {
        let mut q: EventQueue = EventQueue::new();
        q.try_push(ev(1)).unwrap();
        q.try_push(ev(2)).unwrap();
        q.try_push(ev(3)).unwrap();
        assert_eq!(q.pop(), Some(ev(1)));
        assert_eq!(q.pop(), Some(ev(2)));
        assert_eq!(q.pop(), Some(ev(3)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn full_queue_rejects_newest() {
        let mut q: EventQueue<4> = EventQueue::new();
        for n in 0..4 {
            q.try_push(ev(n)).unwrap();
        }
        assert!(q.is_full());
        assert_eq!(q.try_push(ev(99)), Err(ev(99)));
        assert_eq!(q.len(), 4);
        for n in 0..4 {
            assert_eq!(q.pop(), Some(ev(n)));
        }
    }

    #[test]
    fn wraps_around() {
        let mut q: EventQueue<3> = EventQueue::new();
        for round in 0..10u8 {
            q.try_push(ev(round)).unwrap();
            q.try_push(ev(round + 100)).unwrap();
            assert_eq!(q.pop(), Some(ev(round)));
            assert_eq!(q.pop(), Some(ev(round + 100)));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn clear_resets() {
        let mut q: EventQueue = EventQueue::new();
        q.try_push(ev(1)).unwrap();
        q.try_push(ev(2)).unwrap();
        q.clear();
        assert!(q.is_empty());
        q.try_push(ev(3)).unwrap();
        assert_eq!(q.pop(), Some(ev(3)));
    }
}
