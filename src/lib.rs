// src/lib.rs
//
// Backend de controle de estoque de componentes eletrônicos:
// componentes, produtos (lista de materiais), movimentações de
// estoque (Entrada/Saída), alertas de estoque baixo, hierarquia de
// classificação (Grupo → Dispositivo → Valor → Pacote) e usuários.
//
// A camada HTTP fica fora deste crate: os serviços em `services` são
// a API pública, e os repositórios em `db` são a única superfície de
// acesso a dados.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
