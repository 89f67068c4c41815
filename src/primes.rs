use crate::big::BASE;

use log::trace;
use std::{cell::RefCell, rc::Rc};

/// Primes are only generated below this, so every prime handed out fits in a
/// single digit and can be used with the fast single digit operations.
pub const PRIME_CEILING: u32 = BASE as u32;

thread_local! {
    static SHARED: PrimeCache = PrimeCache::new();
}

/// An append-only, ascending cache of primes. Clones share the same cache.
///
/// The cache is reference counted and not `Send`: each thread that
/// simplifies fractions grows its own `shared` cache.
#[derive(Clone, Debug)]
pub struct PrimeCache {
    primes: Rc<RefCell<Vec<u32>>>,
    ceiling: u32
}
impl Default for PrimeCache {
    fn default() -> Self {
        Self::new()
    }
}
impl PrimeCache {
    /// A fresh cache, seeded with 2 and 3
    pub fn new() -> Self {
        Self::with_ceiling(PRIME_CEILING)
    }
    /// A fresh cache which never yields a prime greater than or equal to
    /// `ceiling`
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            primes: Rc::new(RefCell::new(vec![2, 3])),
            ceiling: ceiling.min(PRIME_CEILING)
        }
    }
    /// The cache used by default on this thread
    pub fn shared() -> Self {
        SHARED.with(Clone::clone)
    }
    /// Number of primes found so far
    pub fn len(&self) -> usize {
        self.primes.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Start a new generator at the first prime
    pub fn primes(&self) -> Primes {
        Primes {
            cache: self.clone(),
            cursor: 0
        }
    }
    fn get(&self, index: usize) -> Option<u32> {
        self.primes.borrow().get(index).copied()
    }
    // Trial divide odd candidates by the cached primes up to their square
    // root, appending the first prime found
    fn grow(&self) -> Option<u32> {
        let mut primes = self.primes.borrow_mut();
        let mut candidate = *primes.last()?;
        loop {
            candidate = candidate.checked_add(2)?;
            if candidate >= self.ceiling {
                return None;
            }
            let is_prime = primes.iter()
                .take_while(|&&prime| prime as u64 * prime as u64 <= candidate as u64)
                .all(|&prime| candidate % prime != 0);
            if is_prime {
                break;
            }
        }
        primes.push(candidate);
        if primes.len().is_power_of_two() {
            trace!("prime cache holds {} primes, the largest being {}", primes.len(), candidate);
        }
        Some(candidate)
    }
}

/// Iterator over ascending primes backed by a `PrimeCache`. Each generator
/// keeps its own cursor, so several may walk the same cache independently.
/// Iteration ends once the cache's ceiling is reached.
/// ```rust
/// use tpa::Primes;
/// let primes: Vec<u32> = Primes::new().take(5).collect();
/// assert_eq!(primes, [2, 3, 5, 7, 11]);
/// ```
#[derive(Clone, Debug)]
pub struct Primes {
    cache: PrimeCache,
    cursor: usize
}
impl Default for Primes {
    fn default() -> Self {
        Self::new()
    }
}
impl Primes {
    /// A generator over this thread's shared cache
    pub fn new() -> Self {
        PrimeCache::shared().primes()
    }
    /// Like `next`, but returns 0 once the ceiling is reached
    pub fn next_prime(&mut self) -> u32 {
        self.next().unwrap_or(0)
    }
}
impl Iterator for Primes {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let prime = match self.cache.get(self.cursor) {
            Some(prime) => prime,
            None => self.cache.grow()?
        };
        if prime >= self.cache.ceiling {
            return None;
        }
        self.cursor += 1;
        Some(prime)
    }
}
