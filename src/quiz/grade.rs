/// Final result of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeReport {
    pub percentage: u32,
    pub letter: char,
}

/// Grades against the number of questions actually presented, not the
/// configured target, so a short session still reads honestly.
pub fn grade(score: usize, total: usize) -> GradeReport {
    if total == 0 {
        return GradeReport {
            percentage: 0,
            letter: 'F',
        };
    }

    let percentage = ((score as f64 / total as f64) * 100.0).round() as u32;

    GradeReport {
        percentage,
        letter: letter_for(percentage),
    }
}

fn letter_for(percentage: u32) -> char {
    match percentage {
        p if p >= 90 => 'A',
        p if p >= 80 => 'B',
        p if p >= 70 => 'C',
        p if p >= 60 => 'D',
        _ => 'F',
    }
}
