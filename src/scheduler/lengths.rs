use rand::Rng;

/// Source des longueurs de bloc candidates, injectée dans le scheduler.
pub trait BlockLengthSource {
    /// Longueur dans `[min, max]` (jours).
    fn draw(&mut self, min: u32, max: u32) -> u32;
}

/// Tirage uniforme à partir d'un générateur quelconque (graine maîtrisée
/// par l'appelant).
#[derive(Debug, Clone)]
pub struct RandomBlockLength<R> {
    rng: R,
}

impl<R: Rng> RandomBlockLength<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BlockLengthSource for RandomBlockLength<R> {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}

/// Longueur constante, ramenée dans `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct FixedBlockLength(pub u32);

impl BlockLengthSource for FixedBlockLength {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        self.0.clamp(min, max)
    }
}

/// Séquence scriptée, rejouée en boucle.
#[derive(Debug, Clone)]
pub struct CycleBlockLength {
    lengths: Vec<u32>,
    next: usize,
}

impl CycleBlockLength {
    pub fn new(lengths: Vec<u32>) -> Self {
        Self { lengths, next: 0 }
    }
}

impl BlockLengthSource for CycleBlockLength {
    fn draw(&mut self, min: u32, max: u32) -> u32 {
        if self.lengths.is_empty() {
            return min;
        }
        let len = self.lengths[self.next % self.lengths.len()];
        self.next += 1;
        len.clamp(min, max)
    }
}
