use super::*;
use crate::amazons_position;

fn small_board() -> Board {
    Board::from_setup(&StartingPosition::small()).unwrap()
}

fn parse(side: Side, notation: &str) -> AmazonsMove {
    AmazonsMove::parse(side, notation).unwrap()
}

#[test]
fn test_small_setup_places_queens() {
    let board = small_board();
    assert_eq!(board.queens(Side::A), vec![Position::new(2, 0), Position::new(3, 5)]);
    assert_eq!(board.queens(Side::B), vec![Position::new(0, 3), Position::new(5, 2)]);
    assert!(board.burned().is_empty());
    assert_eq!(board.winner(), Winner::NoWinner);
}

#[test]
fn test_apply_relocates_and_burns() {
    let mut board = small_board();
    board.apply(&parse(Side::A, "2,0->2,3/2,4"), Side::A).unwrap();

    assert_eq!(board.get(Position::new(2, 0)).unwrap(), Tile::Empty);
    assert_eq!(board.get(Position::new(2, 3)).unwrap(), Tile::Queen(Side::A));
    assert_eq!(board.get(Position::new(2, 4)).unwrap(), Tile::Burned);
    assert_eq!(board.burned(), vec![Position::new(2, 4)]);
}

#[test]
fn test_board_and_snapshot_agree_after_a_move() {
    let mut board = small_board();
    let snapshot = BoardSnapshot::from_setup(&StartingPosition::small()).unwrap();
    let amazons_move = parse(Side::A, "2,0->2,3/2,4");

    board.apply(&amazons_move, Side::A).unwrap();
    let next = snapshot.apply(&amazons_move);

    assert_eq!(Board::from_snapshot(&next), board);
    assert_eq!(BoardSnapshot::from_board(&board, 1), next);
}

#[test]
fn test_burn_on_vacated_origin_is_allowed() {
    let mut board = small_board();
    board.apply(&parse(Side::A, "2,0->2,3/2,0"), Side::A).unwrap();
    assert_eq!(board.get(Position::new(2, 0)).unwrap(), Tile::Burned);
}

#[test]
fn test_burn_through_vacated_origin_is_allowed() {
    let mut board = amazons_position! { 1, 4;
        ..a.
    };
    let amazons_move = parse(Side::A, "0,2->0,3/0,0");
    board.apply(&amazons_move, Side::A).unwrap();
    assert_eq!(board.get(Position::new(0, 0)).unwrap(), Tile::Burned);
    assert_eq!(board.get(Position::new(0, 3)).unwrap(), Tile::Queen(Side::A));
}

#[test]
fn test_wrong_side_to_move() {
    let board = small_board();
    let result = board.validate_move(&parse(Side::B, "0,3->1,3/2,3"), Side::A);
    assert_eq!(
        result,
        Err(BoardError::WrongSideToMove {
            expected: Side::A,
            actual: Side::B,
        })
    );
}

#[test]
fn test_origin_must_hold_own_queen() {
    let board = small_board();
    let result = board.validate_move(&parse(Side::A, "0,3->1,3/2,3"), Side::A);
    assert_eq!(
        result,
        Err(BoardError::NoQueenAtOrigin {
            side: Side::A,
            position: Position::new(0, 3),
        })
    );

    let result = board.validate_move(&parse(Side::A, "1,1->1,2/1,3"), Side::A);
    assert!(matches!(result, Err(BoardError::NoQueenAtOrigin { .. })));
}

#[test]
fn test_relocation_must_be_a_straight_line() {
    let board = small_board();
    let result = board.validate_move(&parse(Side::A, "2,0->3,2/3,3"), Side::A);
    assert_eq!(
        result,
        Err(BoardError::NotAStraightLine {
            from: Position::new(2, 0),
            to: Position::new(3, 2),
        })
    );
}

#[test]
fn test_relocation_cannot_stay_in_place() {
    let board = small_board();
    let result = board.validate_move(&parse(Side::A, "2,0->2,0/2,1"), Side::A);
    assert!(matches!(result, Err(BoardError::NotAStraightLine { .. })));
}

#[test]
fn test_relocation_path_must_be_clear() {
    let board = amazons_position! { 1, 5;
        a.x..
    };
    let result = board.validate_move(&parse(Side::A, "0,0->0,3/0,4"), Side::A);
    assert_eq!(
        result,
        Err(BoardError::PathBlocked {
            from: Position::new(0, 0),
            to: Position::new(0, 3),
            blocked_at: Position::new(0, 2),
        })
    );
}

#[test]
fn test_legal_relocations_and_out_of_bounds() {
    let board = small_board();
    let result = board.validate_move(&parse(Side::A, "3,5->0,5/1,5"), Side::A);
    assert!(result.is_ok());
    let result = board.validate_move(&parse(Side::B, "0,3->2,3/2,2"), Side::B);
    assert!(result.is_ok());
    let result = board.validate_move(&parse(Side::B, "5,2->2,2/2,1"), Side::B);
    assert!(result.is_ok());
    let result = board.validate_move(&parse(Side::B, "0,3->0,6/0,5"), Side::B);
    assert!(matches!(result, Err(BoardError::OutOfBounds { .. })));
}

#[test]
fn test_relocation_cannot_pass_a_queen() {
    let board = amazons_position! { 1, 4;
        a.b.
    };
    let result = board.validate_move(&parse(Side::A, "0,0->0,3/0,1"), Side::A);
    assert_eq!(
        result,
        Err(BoardError::PathBlocked {
            from: Position::new(0, 0),
            to: Position::new(0, 3),
            blocked_at: Position::new(0, 2),
        })
    );
}

#[test]
fn test_illegal_burns() {
    let board = amazons_position! { 2, 4;
        a.x.
        ....
    };
    // Burn target behind a burned tile.
    let result = board.validate_move(&parse(Side::A, "0,0->0,1/0,3"), Side::A);
    assert_eq!(
        result,
        Err(BoardError::IllegalBurn {
            from: Position::new(0, 1),
            target: Position::new(0, 3),
        })
    );
    // Burning the new square itself.
    let result = board.validate_move(&parse(Side::A, "0,0->0,1/0,1"), Side::A);
    assert!(matches!(result, Err(BoardError::IllegalBurn { .. })));
    // Knight-jump burn.
    let result = board.validate_move(&parse(Side::A, "0,0->1,0/0,2"), Side::A);
    assert!(matches!(result, Err(BoardError::IllegalBurn { .. })));
}

#[test]
fn test_failed_apply_leaves_board_untouched() {
    let mut board = small_board();
    let before = board.clone();
    assert!(board.apply(&parse(Side::A, "2,0->3,2/3,3"), Side::A).is_err());
    assert_eq!(board, before);
}

#[test]
fn test_put_rejects_occupied_tiles() {
    let mut board = small_board();
    let result = board.put(Position::new(2, 0), Tile::Burned);
    assert_eq!(
        result,
        Err(BoardError::TileOccupied {
            position: Position::new(2, 0),
        })
    );
}

#[test]
fn test_from_layout_rejects_bad_input() {
    assert!(matches!(
        Board::from_layout(2, 2, "a.b"),
        Err(BoardError::InvalidLayout { .. })
    ));
    assert!(matches!(
        Board::from_layout(2, 2, "a.?b"),
        Err(BoardError::InvalidLayout { .. })
    ));
    assert!(matches!(
        Board::from_layout(0, 2, ""),
        Err(BoardError::InvalidDimensions { .. })
    ));
    assert!(Board::from_layout(2, 2, "a./.b").is_ok());
}

#[test]
fn test_winner_when_queens_are_sealed() {
    let board = amazons_position! { 3, 3;
        ax.
        xx.
        ..b
    };
    assert_eq!(board.winner(), Winner::SideBWins);
}
