use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridchess::{movegen, planes::Planes, Board, Color, Square};

const BOARDS: [(&str, &str); 10] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w kq - 0 11",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w - - 4 43",
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w - - 0 1"),
    ("pawn_move", "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3 w - - 0 1"),
    ("pawn_attack", "4k3/8/8/pppppppp/PPPPPPPP/8/8/4K3 w - - 0 1"),
    (
        "pawn_promote",
        "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8 w - - 0 1",
    ),
    (
        "cydonia",
        "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2 w - - 0 1",
    ),
    (
        "max",
        "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/NR4Q1/kN1BB1K1 w - - 0 1",
    ),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, fen)| (name, Board::from_fen(fen).unwrap()))
}

fn bench_pseudo_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("pseudo_legal");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for p in board.pieces_of(board.side()) {
                    black_box(movegen::pseudo_legal(p, board.grid()));
                }
            })
        });
    }
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(board.legal_moves().move_count()))
        });
    }
}

fn bench_apply_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_undo");
    for (name, mut board) in boards() {
        let moves = board.legal_moves().moves();
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    board.apply_move(*mv).unwrap();
                    black_box(board.undo());
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for sq in Square::iter() {
                        black_box(movegen::is_attacked(board.grid(), sq, color));
                    }
                }
            })
        });
    }
}

fn bench_has_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_legal_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| b.iter(|| black_box(board.has_legal_moves())));
    }
}

fn bench_planes(c: &mut Criterion) {
    let mut group = c.benchmark_group("planes");
    for (name, board) in boards() {
        group.bench_function(name, |b| b.iter(|| black_box(Planes::from_board(&board))));
    }
}

criterion_group!(
    chess,
    bench_pseudo_legal,
    bench_legal_moves,
    bench_apply_undo,
    bench_is_attacked,
    bench_has_legal_moves,
    bench_planes,
);

criterion_main!(chess);
