//! Two-level presence index over the price slots.
use crate::price::NUM_SLOTS;
use concordium_std::*;

const WORD_BITS: u16 = 64;
const NUM_WORDS: usize = (NUM_SLOTS / WORD_BITS) as usize;

/// Set of populated slots.
///
/// Bit `j` of `words[i]` marks slot `64 * i + j`. Bit `i` of `summary` is set
/// iff `words[i] != 0`, so finding the lowest populated slot at or above any
/// slot takes at most two trailing-zero scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBitmap {
    summary: u8,
    words: [u64; NUM_WORDS],
}

impl SlotBitmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.summary == 0
    }

    pub fn contains(&self, slot: u16) -> bool {
        if slot >= NUM_SLOTS {
            return false;
        }
        let (word, bit) = locate(slot);
        self.words[word] & (1u64 << bit) != 0
    }

    /// Marks `slot` as populated. `slot` must be below [`NUM_SLOTS`].
    pub fn set(&mut self, slot: u16) {
        let (word, bit) = locate(slot);
        self.words[word] |= 1u64 << bit;
        self.summary |= 1u8 << word;
    }

    /// Marks `slot` as empty. `slot` must be below [`NUM_SLOTS`].
    pub fn clear(&mut self, slot: u16) {
        let (word, bit) = locate(slot);
        self.words[word] &= !(1u64 << bit);
        if self.words[word] == 0 {
            self.summary &= !(1u8 << word);
        }
    }

    /// Lowest populated slot.
    pub fn min(&self) -> Option<u16> {
        self.next_at_or_after(0)
    }

    /// Lowest populated slot that is not below `slot`.
    pub fn next_at_or_after(&self, slot: u16) -> Option<u16> {
        if slot >= NUM_SLOTS {
            return None;
        }
        let (word, bit) = locate(slot);
        let in_word = self.words[word] & (u64::MAX << bit);
        if in_word != 0 {
            return Some(first_slot_of(word, in_word));
        }

        if word + 1 >= NUM_WORDS {
            return None;
        }
        let higher_words = self.summary & (u8::MAX << (word + 1));
        if higher_words == 0 {
            return None;
        }
        let word = higher_words.trailing_zeros() as usize;
        Some(first_slot_of(word, self.words[word]))
    }
}

fn locate(slot: u16) -> (usize, u32) {
    ((slot / WORD_BITS) as usize, u32::from(slot % WORD_BITS))
}

fn first_slot_of(word: usize, bits: u64) -> u16 {
    word as u16 * WORD_BITS + bits.trailing_zeros() as u16
}

impl Serial for SlotBitmap {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        self.summary.serial(out)?;
        for word in self.words.iter() {
            word.serial(out)?;
        }
        Ok(())
    }
}

impl Deserial for SlotBitmap {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let summary = u8::deserial(source)?;
        let mut words = [0u64; NUM_WORDS];
        for word in words.iter_mut() {
            *word = u64::deserial(source)?;
        }

        let consistent = words
            .iter()
            .enumerate()
            .all(|(i, word)| (*word != 0) == (summary & (1u8 << i) != 0));
        if !consistent {
            return Err(ParseError::default());
        }

        Ok(Self { summary, words })
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_set_and_clear() {
        let mut bitmap = SlotBitmap::new();
        claim!(bitmap.is_empty());
        claim_eq!(bitmap.min(), None);

        bitmap.set(70);
        bitmap.set(3);
        claim!(bitmap.contains(70));
        claim!(bitmap.contains(3));
        claim!(!bitmap.contains(4));
        claim_eq!(bitmap.min(), Some(3));

        bitmap.clear(3);
        claim_eq!(bitmap.min(), Some(70));
        bitmap.clear(70);
        claim!(bitmap.is_empty());
        claim_eq!(bitmap, SlotBitmap::new());
    }

    #[concordium_test]
    fn test_clear_keeps_word_with_other_slots() {
        let mut bitmap = SlotBitmap::new();
        bitmap.set(64);
        bitmap.set(127);
        bitmap.clear(64);
        claim!(!bitmap.is_empty());
        claim_eq!(bitmap.min(), Some(127));
    }

    #[concordium_test]
    fn test_next_at_or_after_crosses_words() {
        let mut bitmap = SlotBitmap::new();
        bitmap.set(5);
        bitmap.set(200);
        bitmap.set(NUM_SLOTS - 1);

        claim_eq!(bitmap.next_at_or_after(0), Some(5));
        claim_eq!(bitmap.next_at_or_after(5), Some(5));
        claim_eq!(bitmap.next_at_or_after(6), Some(200));
        claim_eq!(bitmap.next_at_or_after(201), Some(NUM_SLOTS - 1));
        claim_eq!(bitmap.next_at_or_after(NUM_SLOTS - 1), Some(NUM_SLOTS - 1));
        claim_eq!(bitmap.next_at_or_after(NUM_SLOTS), None);

        bitmap.clear(NUM_SLOTS - 1);
        claim_eq!(bitmap.next_at_or_after(201), None);
    }

    #[concordium_test]
    fn test_serialization_is_checked() {
        let mut bitmap = SlotBitmap::new();
        bitmap.set(9);
        bitmap.set(300);
        let bytes = to_bytes(&bitmap);
        claim_eq!(from_bytes::<SlotBitmap>(&bytes), Ok(bitmap));

        let mut inconsistent = bytes.clone();
        inconsistent[0] = 0;
        claim!(from_bytes::<SlotBitmap>(&inconsistent).is_err());
    }
}
