use ai_games::games::tictactoe::{best_move, Board as TicTacToeBoard, Mark};
use ai_games::games::twenty48::{Board, Twenty48Config, Twenty48Game};
use ai_games::{ControlMode, Direction, Engine, SnakeConfig, SnakeGame};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

fn bench_minimax(c: &mut Criterion) {
    c.bench_function("minimax/empty_board", |bch| {
        let board = TicTacToeBoard::new();
        bch.iter(|| black_box(best_move(black_box(&board), Mark::X)))
    });
    c.bench_function("minimax/after_corner", |bch| {
        let board: TicTacToeBoard = "X........".parse().unwrap_or_default();
        bch.iter(|| black_box(best_move(black_box(&board), Mark::O)))
    });
}

fn bench_autopilot(c: &mut Criterion) {
    c.bench_function("snake/autopilot_100_ticks", |bch| {
        bch.iter_batched(
            || {
                let mut game = SnakeGame::seeded(SnakeConfig::default(), 7);
                let _ = game.set_control_mode(ControlMode::Autopilot);
                game
            },
            |mut game| {
                for _ in 0..100 {
                    if game.tick().is_err() {
                        break;
                    }
                }
                black_box(game.score())
            },
            BatchSize::SmallInput,
        )
    });
}

fn corpus() -> Vec<Board> {
    let mut game = Twenty48Game::seeded(Twenty48Config::default(), 42);
    let mut boards = vec![*game.board()];
    for direction in Direction::ALL.into_iter().cycle().take(40) {
        if game.move_tiles(direction).is_err() {
            break;
        }
        boards.push(*game.board());
    }
    boards
}

fn bench_shift(c: &mut Criterion) {
    let boards = corpus();
    for direction in Direction::ALL {
        c.bench_function(&format!("2048/shift_{direction}"), |bch| {
            bch.iter(|| {
                let mut acc = 0u32;
                for board in &boards {
                    acc ^= board.shift(direction).1;
                }
                black_box(acc)
            })
        });
    }
}

criterion_group!(benches, bench_minimax, bench_autopilot, bench_shift);
criterion_main!(benches);
