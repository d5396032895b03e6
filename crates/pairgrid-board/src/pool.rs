//! The fixed symbol pool boards draw from.

/// The ordered emoji pool.
///
/// A board of side length N consumes the first N²/2 entries, so the pool
/// caps the largest supported board: 128 symbols cover up to 16×16
/// (256 tiles, 128 pairs), the largest size the web client offers.
/// Order matters — [`generate`](crate::generate) always takes a prefix,
/// which keeps symbol frequency inspectable in tests.
pub const SYMBOLS: [&str; 128] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼",
    "🐨", "🐯", "🦁", "🐮", "🐷", "🐸", "🐵", "🐔",
    "🐧", "🐦", "🐤", "🦆", "🦅", "🦉", "🦇", "🐺",
    "🐗", "🐴", "🦄", "🐝", "🐛", "🦋", "🐌", "🐞",
    "🐜", "🦗", "🕷", "🦂", "🐢", "🐍", "🦎", "🐙",
    "🦑", "🦐", "🦀", "🐡", "🐠", "🐟", "🐬", "🐳",
    "🐋", "🦈", "🐊", "🐅", "🐆", "🦓", "🦍", "🐘",
    "🦏", "🐪", "🐫", "🦒", "🐃", "🐂", "🐄", "🐎",
    "🐖", "🐏", "🐑", "🐐", "🦌", "🐕", "🐩", "🐈",
    "🐓", "🦃", "🕊", "🐇", "🐁", "🐀", "🐿", "🦔",
    "🍏", "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇",
    "🍓", "🍈", "🍒", "🍑", "🍍", "🥝", "🍅", "🥑",
    "🍆", "🥔", "🥕", "🌽", "🌶", "🥒", "🥦", "🍄",
    "🥜", "🌰", "🍞", "🥐", "🥖", "🥨", "🥞", "🧀",
    "🍖", "🍗", "🥩", "🍔", "🍟", "🍕", "🌭", "🥪",
    "🌮", "🌯", "🥗", "🍜", "🍣", "🍩", "🍪", "🎂",
];
