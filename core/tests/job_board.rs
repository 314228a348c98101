use labormarket_core::job_board::{JobBoard, Vacancy};

#[test]
fn clear_is_idempotent() {
    let mut board = JobBoard::new();
    board.post(Vacancy::new("firm-0001", "15-1200", "MSA1"));
    board.post(Vacancy::new("firm-0002", "15-1300", "MSA2"));

    board.clear();
    assert!(board.is_empty());
    board.clear();
    assert!(board.is_empty());
    assert_eq!(board.len(), 0);
}

#[test]
fn find_returns_matches_in_posting_order() {
    let mut board = JobBoard::new();
    board.post(Vacancy::new("firm-0003", "15-1200", "MSA2"));
    board.post(Vacancy::new("firm-0001", "15-1999", "MSA1"));
    board.post(Vacancy::new("firm-0002", "15-1200", "MSA1"));

    let matches = board.find(|v| v.soc_code == "15-1200");
    let firms: Vec<_> = matches.iter().map(|v| v.firm_id.as_str()).collect();
    assert_eq!(firms, vec!["firm-0003", "firm-0002"]);

    // find never mutates.
    assert_eq!(board.len(), 3);
}

#[test]
fn remove_takes_a_single_occurrence() {
    let mut board = JobBoard::new();
    let vacancy = Vacancy::new("firm-0001", "15-1200", "MSA1");
    board.post(vacancy.clone());
    board.post(vacancy.clone());

    assert!(board.remove(&vacancy));
    assert_eq!(board.len(), 1);
    assert!(board.remove(&vacancy));
    assert!(!board.remove(&vacancy));
    assert!(board.is_empty());
}

#[test]
fn vacancies_are_equal_by_value() {
    let a = Vacancy::new("firm-0001", "15-1200", "MSA1");
    let b = Vacancy::new(String::from("firm-0001"), String::from("15-1200"), String::from("MSA1"));
    assert_eq!(a, b);
    assert_ne!(a, Vacancy::new("firm-0001", "15-1200", "MSA2"));
}
