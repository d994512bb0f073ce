/// Levenshtein distance between `a` and `b`, counted in `char`s.
///
/// Every insertion, deletion and substitution costs 1. Only a single row of the
/// classic `(|a|+1) x (|b|+1)` table is kept alive, so memory is `O(|b|)`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // row[j] holds table[i][j] for the row currently being filled
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut diagonal = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let above = row[j];
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            row[j] = (above + 1) // deletion
                .min(row[j - 1] + 1) // insertion
                .min(diagonal + cost); // substitution
            diagonal = above;
        }
    }

    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::edit_distance;

    #[test]
    fn test_identical_strings_have_zero_distance() {
        for s in ["", "a", "help", "history"] {
            assert_eq!(edit_distance(s, s), 0);
        }
    }

    #[test]
    fn test_distance_from_empty_is_length() {
        assert_eq!(edit_distance("", "alias"), 5);
        assert_eq!(edit_distance("sleep", ""), 5);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [("kitten", "sitting"), ("hepl", "help"), ("exec", "exit"), ("", "cls")];
        for (a, b) in pairs {
            assert_eq!(edit_distance(a, b), edit_distance(b, a), "{a} / {b}");
        }
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("hepl", "help"), 2);
        assert_eq!(edit_distance("hlp", "help"), 1);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(edit_distance("héllo", "hello"), 1);
    }
}
