use crate::puzzle::RatingBucket;

/// A run of 1-3 adjacent rating buckets sharing one train/test output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub buckets: Vec<RatingBucket>,
}

impl Window {
    /// `range_<b>` for a single bucket, `range_<first>_<last>` otherwise.
    pub fn name(&self) -> String {
        match self.buckets.as_slice() {
            [] => "range_empty".to_string(),
            [only] => format!("range_{}", only),
            [first, .., last] => format!("range_{}_{}", first, last),
        }
    }
}

/// Windows over an ascending bucket sequence `b`:
/// `{b0}`, `{b0,b1}`, centered triples for i in 2..=n-4, then the last
/// three buckets exactly once.
pub fn build_windows(b: &[RatingBucket]) -> Vec<Window> {
    let n = b.len();
    let mut out = Vec::new();
    let mut tail_done = false;
    for i in 0..n {
        let members = match i {
            0 => &b[..1],
            1 => &b[..2],
            _ if i + 4 <= n => &b[i - 1..=i + 1],
            _ => {
                if tail_done { continue; }
                tail_done = true;
                &b[n - 3..]
            }
        };
        out.push(Window { buckets: members.to_vec() });
    }
    out
}
