use rand::Rng;
use rand::seq::SliceRandom;

/// Combine the incorrect answers with the correct one and return them in
/// a randomized display order.
///
/// Uses `rand`'s Fisher-Yates shuffle, which is uniform over all
/// permutations. The output always holds every input element exactly
/// once: `incorrect.len() + 1` choices in total.
#[must_use]
pub fn shuffled_choices<R: Rng + ?Sized>(
    correct: &str,
    incorrect: &[String],
    rng: &mut R,
) -> Vec<String> {
    let mut choices: Vec<String> = Vec::with_capacity(incorrect.len() + 1);
    choices.extend(incorrect.iter().cloned());
    choices.push(correct.to_string());
    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn output_is_a_permutation_of_the_input() {
        let incorrect = strings(&["Red", "Green", "Red", "Yellow"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let mut shuffled = shuffled_choices("Blue", &incorrect, &mut rng);
            assert_eq!(shuffled.len(), incorrect.len() + 1);

            let mut expected = incorrect.clone();
            expected.push("Blue".to_string());
            expected.sort();
            shuffled.sort();
            assert_eq!(shuffled, expected);
        }
    }

    #[test]
    fn correct_answer_appears_exactly_once() {
        let incorrect = strings(&["Rome", "Madrid", "Berlin"]);
        let mut rng = StdRng::seed_from_u64(42);

        let shuffled = shuffled_choices("Paris", &incorrect, &mut rng);
        let count = shuffled.iter().filter(|c| *c == "Paris").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn single_choice_round_trips() {
        let mut rng = StdRng::seed_from_u64(1);
        let shuffled = shuffled_choices("True", &[], &mut rng);
        assert_eq!(shuffled, strings(&["True"]));
    }
}
