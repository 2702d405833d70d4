use crate::{Key, Steps};

/// Number of `n/2` / `3n+1` transformations needed to bring `n` down to 1.
///
/// `n` must be positive: the loop never terminates for 0. Callers validate the
/// sampling range before numbers get here.
pub fn collatz_steps(mut n: Key) -> Steps {
    debug_assert!(n >= 1, "collatz_steps called with 0");
    let mut steps = 0;
    while n != 1 {
        if n % 2 == 0 {
            n /= 2;
        } else {
            n = 3 * n + 1;
        }
        steps += 1;
    }
    steps
}
