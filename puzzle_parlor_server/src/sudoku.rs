use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

use puzzle_parlor_core::{Grid, SudokuLevel, SudokuPuzzle, EMPTY_GRID};

/// 各难度挖掉的格子数
fn blanks(level: SudokuLevel) -> usize {
    match level {
        SudokuLevel::Children => 20,
        SudokuLevel::Easy => 35,
        SudokuLevel::Medium => 45,
        SudokuLevel::Hard => 55,
    }
}

/// 标准的合法终盘
fn base_solution() -> Grid {
    let mut grid = EMPTY_GRID;
    for (r, row) in grid.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = ((r * 3 + r / 3 + c) % 9 + 1) as u8;
        }
    }
    grid
}

/// 生成一道题：对终盘做保持合法性的变换（数字重映射、宫内行列交换、
/// 行带/列带交换），再按难度挖空
pub fn make_puzzle<R: Rng + ?Sized>(level: SudokuLevel, rng: &mut R) -> SudokuPuzzle {
    let mut solution = base_solution();

    // 数字重映射
    let mut digits: Vec<u8> = (1..=9).collect();
    digits.shuffle(rng);
    for cell in solution.iter_mut().flatten() {
        *cell = digits[(*cell - 1) as usize];
    }

    solution = permute_rows(solution, rng);
    solution = transpose(permute_rows(transpose(solution), rng));

    let mut puzzle = solution;
    for idx in (0..81).choose_multiple(rng, blanks(level)) {
        puzzle[idx / 9][idx % 9] = 0;
    }

    SudokuPuzzle { puzzle, solution }
}

/// 打乱行带顺序，以及每个行带内部三行的顺序
fn permute_rows<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Grid {
    let mut bands = [0usize, 1, 2];
    bands.shuffle(rng);

    let mut order = Vec::with_capacity(9);
    for band in bands {
        let mut rows = [band * 3, band * 3 + 1, band * 3 + 2];
        rows.shuffle(rng);
        order.extend(rows);
    }

    let mut out = EMPTY_GRID;
    for (dst, &src) in order.iter().enumerate() {
        out[dst] = grid[src];
    }
    out
}

fn transpose(grid: Grid) -> Grid {
    let mut out = EMPTY_GRID;
    for (r, row) in grid.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][r] = v;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_valid_solution(grid: &Grid) -> bool {
        let full = |cells: Vec<u8>| {
            let mut cells = cells;
            cells.sort_unstable();
            cells == (1..=9).collect::<Vec<u8>>()
        };
        (0..9).all(|i| {
            let row = grid[i].to_vec();
            let col = (0..9).map(|r| grid[r][i]).collect();
            let boxed = (0..9).map(|k| grid[(i / 3) * 3 + k / 3][(i % 3) * 3 + k % 3]).collect();
            full(row) && full(col) && full(boxed)
        })
    }

    #[test]
    fn test_base_solution_is_valid() {
        assert!(is_valid_solution(&base_solution()));
    }

    #[test]
    fn test_generated_pairs_are_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        for level in SudokuLevel::ALL {
            let pair = make_puzzle(level, &mut rng);
            assert!(is_valid_solution(&pair.solution));
            assert!(pair.validate().is_ok());
            let empty = pair.puzzle.iter().flatten().filter(|&&v| v == 0).count();
            assert_eq!(empty, blanks(level));
        }
    }

    #[test]
    fn test_puzzles_differ_between_calls() {
        let mut rng = StdRng::seed_from_u64(12);
        let a = make_puzzle(SudokuLevel::Easy, &mut rng);
        let b = make_puzzle(SudokuLevel::Easy, &mut rng);
        assert_ne!(a.solution, b.solution);
    }
}
