//! Term sets matched against a lowercased message body.

pub const URGENCY: &[&str] = &[
    "immediately",
    "final notice",
    "today",
    "urgent",
    "asap",
    "emergency",
    "act now",
    "limited time",
];

pub const PAYMENT: &[&str] = &[
    "gift card",
    "wire",
    "crypto",
    "payment",
    "invoice",
    "western union",
    "moneygram",
    "bitcoin",
    "ethereum",
];

pub const OTP: &[&str] = &[
    "code",
    "otp",
    "verification",
    "verify",
    "one-time code",
    "verification code",
];

pub const IMPERSONATION: &[&str] = &[
    "irs",
    "usps",
    "fedex",
    "bank",
    "paypal",
    "microsoft",
    "medicare",
    "social security",
    "ssa",
    "treasury",
    "fbi",
    "police",
    "sheriff",
];

pub const GRANDPARENT_SCAM: &[&str] = &[
    "grandchild",
    "grandson",
    "granddaughter",
    "in jail",
    "hospital",
    "car accident",
    "bail money",
    "lawyer",
    "attorney",
];

pub const ROMANCE_SCAM: &[&str] = &[
    "my love",
    "sweetheart",
    "darling",
    "emergency money",
    "travel expenses",
    "visa fees",
    "customs",
    "stranded",
];

pub const LOTTERY_SCAM: &[&str] = &[
    "you've won",
    "prize winner",
    "lottery",
    "sweepstakes",
    "jackpot",
    "claim your prize",
    "processing fee",
    "tax payment",
    "upfront payment",
];

pub const INVESTMENT_SCAM: &[&str] = &[
    "guaranteed return",
    "risk-free",
    "once in a lifetime",
    "exclusive opportunity",
    "limited offer",
    "act fast",
    "get rich quick",
];

pub const CHARITY_SCAM: &[&str] = &[
    "disaster relief",
    "hurricane",
    "flood",
    "wildfire",
    "donate now",
    "help victims",
    "urgent donation",
    "crisis fund",
];

pub const CONTRACTOR_SCAM: &[&str] = &[
    "damage inspection",
    "roof repair",
    "driveway",
    "siding",
    "cash discount",
    "today only",
    "leftover materials",
];

pub const MEDICARE_SCAM: &[&str] = &[
    "medicare number",
    "benefits verification",
    "new card",
    "medicare id",
    "coverage issue",
];
