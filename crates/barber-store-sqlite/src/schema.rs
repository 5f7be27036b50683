//! SQL schema for the barbershop SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS barbeiros (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    nome          TEXT NOT NULL,
    cpf           TEXT NOT NULL UNIQUE,
    email         TEXT,
    telefone      TEXT,
    especialidade TEXT,
    endereco      TEXT,
    cargo         TEXT NOT NULL DEFAULT 'Barbeiro'
                  CHECK (cargo IN ('Barbeiro', 'Cabeleireiro', 'Recepcionista', 'Gerente', 'Outro'))
);

CREATE TABLE IF NOT EXISTS clientes (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    nome     TEXT NOT NULL,
    cpf      TEXT NOT NULL UNIQUE,
    email    TEXT,
    telefone TEXT,
    endereco TEXT
);

CREATE TABLE IF NOT EXISTS servicos (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    nome      TEXT NOT NULL UNIQUE,
    preco     TEXT NOT NULL,   -- decimal kept as entered
    duracao   TEXT,
    descricao TEXT
);

-- No ON DELETE clauses: a referenced staff member, client or service cannot
-- be deleted while appointments point at it.
CREATE TABLE IF NOT EXISTS agendamentos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    data        TEXT NOT NULL,   -- YYYY-MM-DD
    horario     TEXT NOT NULL,   -- HH:MM
    cpf_cliente TEXT NOT NULL REFERENCES clientes (cpf),
    id_barbeiro INTEGER NOT NULL REFERENCES barbeiros (id),
    id_servico  INTEGER NOT NULL REFERENCES servicos (id),
    UNIQUE (data, horario, id_barbeiro)
);

CREATE INDEX IF NOT EXISTS agendamentos_servico_idx ON agendamentos(data, id_servico);

PRAGMA user_version = 1;
";
