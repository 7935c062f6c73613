#![allow(dead_code)]

use crudgen::config::GeneratorConfig;
use crudgen::generator::install_templates;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub const SCHEMA: &str = r#"generator client {
  provider = "prisma-client-js"
}

model User {
  id        Int      @id @default(autoincrement())
  email     String   @unique
  createdAt DateTime @default(now())
}

model Widget {
  id        Int       @id @default(autoincrement())
  name      String    @unique
  qty       Int
  price     Float?
  active    Boolean   @default(true)
  createdAt DateTime  @default(now())
  updatedAt DateTime  @updatedAt
  deletedAt DateTime?
  // relation starts
  ownerId   Int
  owner     User      @relation(fields: [ownerId], references: [id])
}

model Category {
  id    Int    @id
  title String
}
"#;

pub const INVERSIFY_CONFIG: &str = "import { Container } from 'inversify';
import { UserController } from '../controllers/userController';
import { UserService } from '../services/userService';

const container = new Container();

container.bind<UserController>(UserController).toSelf();
container.bind<UserService>(UserService).toSelf();

export default container;
";

pub const V1_ROUTES: &str = "import { Router } from 'express';
import authMiddleware from '../middlewares/authMiddleware';
import UserRoutes from './userRoutes';

const router = Router();

router.use('/api/v1/users', authMiddleware, UserRoutes);

export default router;
";

pub const SWAGGER_CONFIG: &str = "import userPaths from './paths/userPaths';
// Path Imports ends
import userDefinitions from './definitions/userDefinition';
// Definition Imports ends

const swaggerDefinition = {
    paths: {
        ...userPaths,
        // register new paths here
    },
    definitions: {
        ...userDefinitions,
        // register new defintions here
    },
};

export default swaggerDefinition;
";

/// Unique, empty directory under the system temp dir
pub fn temp_dir(prefix: &str) -> PathBuf {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "{}_{}_{}_{}",
        prefix,
        std::process::id(),
        counter,
        nanos
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project with the schema, the bundled templates and the three shared files
pub fn fixture_project(prefix: &str) -> PathBuf {
    let root = temp_dir(prefix);
    let config = GeneratorConfig::default();
    write(&root, "db/prisma/schema.prisma", SCHEMA);
    write(&root, "src/config/inversifyConfig.ts", INVERSIFY_CONFIG);
    write(&root, "src/routes/v1.ts", V1_ROUTES);
    write(&root, "src/config/swagger/swaggerConfig.ts", SWAGGER_CONFIG);
    install_templates(&root.join(&config.template_dir), false).unwrap();
    root
}

/// Every file under `root` with its content, keyed by relative path
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let relative = path.strip_prefix(root).unwrap().to_path_buf();
                files.insert(relative, fs::read(&path).unwrap());
            }
        }
    }
    files
}

pub fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}
